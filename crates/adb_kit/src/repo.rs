//! Device-scoped repository handle for ADB operations

use crate::command::{AdbInvocation, CommandRunner, ProcessRunner};
use crate::config::RepoConfig;
use crate::error::{AdbError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Handle to a single Android device, identified by its serial.
///
/// All operations run against exactly one device; the serial is immutable
/// for the lifetime of the handle. Process execution goes through the
/// [`CommandRunner`] seam, defaulting to real process spawning.
pub struct AdbRepo<R = ProcessRunner> {
    serial: String,
    config: RepoConfig,
    runner: R,
}

impl AdbRepo {
    /// Create a handle for `serial` with default configuration.
    pub fn new(serial: impl Into<String>) -> Self {
        Self::with_runner(serial, ProcessRunner)
    }
}

impl<R: CommandRunner> AdbRepo<R> {
    /// Create a handle with a custom command runner.
    pub fn with_runner(serial: impl Into<String>, runner: R) -> Self {
        Self {
            serial: serial.into(),
            config: RepoConfig::default(),
            runner,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: RepoConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the directory for local scratch files and outputs.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.config.work_dir = work_dir.into();
        self
    }

    /// Set the screenshot downsample factor.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.config.scale_factor = scale_factor;
        self
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn work_dir(&self) -> &Path {
        &self.config.work_dir
    }

    pub(crate) fn scale_factor(&self) -> f32 {
        self.config.scale_factor
    }

    /// Execute a caller-supplied adb command string against this device and
    /// return its standard output.
    ///
    /// The string is normalized per [`AdbInvocation::classify`].
    pub async fn execute_command(&self, command: &str) -> Result<String> {
        self.run(&AdbInvocation::classify(command)).await
    }

    /// Execute a pre-split argument list.
    ///
    /// Tokens are joined with spaces and classified exactly like the string
    /// form.
    pub async fn execute_args<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let command = args
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.execute_command(&command).await
    }

    /// Most recent `lines` device log entries for `keyword`, time-formatted.
    pub async fn logcat(&self, keyword: &str, lines: u32) -> Result<String> {
        let lines = lines.to_string();
        let args = ["logcat", "-d", "-v", "time", "-t", lines.as_str(), "-s", keyword]
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.run(&AdbInvocation::Raw(args)).await
    }

    /// Run a shell command on the device.
    pub(crate) async fn shell(&self, command: &str) -> Result<String> {
        self.run(&AdbInvocation::Shell(command.to_string())).await
    }

    pub(crate) async fn run(&self, invocation: &AdbInvocation) -> Result<String> {
        let argv = invocation.argv(&self.serial);
        self.dispatch(&argv)
            .await
            .map_err(|reason| AdbError::CommandExecution {
                command: self.command_line(&argv),
                reason,
            })
    }

    /// Copy a remote file to a local path. Retrieval is a distinct process
    /// mode, not a shell command.
    pub(crate) async fn pull(&self, remote: &str, local: &Path) -> Result<()> {
        let argv = AdbInvocation::Raw(vec![
            "pull".to_string(),
            remote.to_string(),
            local.display().to_string(),
        ])
        .argv(&self.serial);
        self.dispatch(&argv)
            .await
            .map_err(|reason| AdbError::RemoteTransfer {
                command: self.command_line(&argv),
                reason,
            })?;
        Ok(())
    }

    /// Delete a remote scratch file.
    ///
    /// `rm -f` keeps the call idempotent when the artifact was never
    /// created, so pipelines can attempt cleanup on every exit path.
    pub(crate) async fn remove_remote(&self, path: &str) -> Result<()> {
        let argv = AdbInvocation::Shell(format!("rm -f {}", path)).argv(&self.serial);
        self.dispatch(&argv)
            .await
            .map_err(|reason| AdbError::RemoteCleanup {
                path: path.to_string(),
                reason,
            })?;
        Ok(())
    }

    /// Unique per-invocation remote scratch path.
    pub(crate) fn remote_scratch_path(&self, stem: &str, ext: &str) -> String {
        format!("/sdcard/{}-{}.{}", stem, Uuid::new_v4().simple(), ext)
    }

    async fn dispatch(&self, argv: &[String]) -> std::result::Result<String, String> {
        debug!("{}", self.command_line(argv));
        match self.runner.output(&self.config.adb_path, argv).await {
            Ok(output) if output.success => Ok(output.stdout),
            Ok(output) => Err(output.failure_reason()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn command_line(&self, argv: &[String]) -> String {
        format!("{} {}", self.config.adb_path, argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{exit, ok, ScriptedRunner};

    #[tokio::test]
    async fn test_execute_command_returns_stdout() {
        let runner = ScriptedRunner::new(|_| ok("ok\n"));
        let repo = AdbRepo::with_runner("abc123", runner);
        let output = repo.execute_command("getprop ro.build.version.sdk").await;
        assert_eq!(output.unwrap(), "ok\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_embeds_command_line() {
        let runner = ScriptedRunner::new(|_| exit(5));
        let repo = AdbRepo::with_runner("abc123", runner);
        let err = repo.execute_command("adb shell false").await.unwrap_err();
        match err {
            AdbError::CommandExecution { command, reason } => {
                assert!(command.contains("-s abc123 shell false"));
                assert_eq!(reason, "exit status 5");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_args_joins_tokens() {
        let runner = ScriptedRunner::new(|_| ok(""));
        let calls = runner.call_log();
        let repo = AdbRepo::with_runner("abc123", runner);
        repo.execute_args(["pm", "list", "packages"]).await.unwrap();
        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec!["-s", "abc123", "shell", "pm list packages"]
        );
    }

    #[tokio::test]
    async fn test_logcat_argv() {
        let runner = ScriptedRunner::new(|_| ok(""));
        let calls = runner.call_log();
        let repo = AdbRepo::with_runner("abc123", runner);
        repo.logcat("ActivityManager", 50).await.unwrap();
        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec![
                "-s",
                "abc123",
                "logcat",
                "-d",
                "-v",
                "time",
                "-t",
                "50",
                "-s",
                "ActivityManager"
            ]
        );
    }

    #[test]
    fn test_remote_scratch_paths_are_unique() {
        let repo = AdbRepo::new("abc123");
        let a = repo.remote_scratch_path("screenshot", "png");
        let b = repo.remote_scratch_path("screenshot", "png");
        assert!(a.starts_with("/sdcard/screenshot-"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }
}
