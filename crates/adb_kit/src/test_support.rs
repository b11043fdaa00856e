//! Scripted command runner for exercising pipelines without a device

use crate::command::{CommandRunner, RunOutput};
use std::io;
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&[String]) -> io::Result<RunOutput> + Send + Sync>;

/// Fake [`CommandRunner`] driven by a closure, recording every argv it is
/// asked to run.
pub(crate) struct ScriptedRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    handler: Handler,
}

impl ScriptedRunner {
    pub fn new(handler: impl Fn(&[String]) -> io::Result<RunOutput> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            handler: Box::new(handler),
        }
    }

    /// Shared handle to the call log, usable after the runner moves into a
    /// repo.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.calls)
    }
}

impl CommandRunner for ScriptedRunner {
    async fn output(&self, _program: &str, args: &[String]) -> io::Result<RunOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        (self.handler)(args)
    }
}

/// Successful run with the given stdout.
pub(crate) fn ok(stdout: &str) -> io::Result<RunOutput> {
    Ok(RunOutput {
        stdout: stdout.to_string(),
        success: true,
        code: Some(0),
    })
}

/// Completed run with a non-zero exit status.
pub(crate) fn exit(code: i32) -> io::Result<RunOutput> {
    Ok(RunOutput {
        stdout: String::new(),
        success: false,
        code: Some(code),
    })
}
