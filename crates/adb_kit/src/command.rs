//! Command classification and process execution for the debug bridge

use std::future::Future;
use std::io;
use tokio::process::Command;

/// A device-scoped adb invocation.
///
/// Caller-supplied command strings are normalized into one of two shapes,
/// decided once at the boundary:
/// - `Shell`: a command line executed by the on-device shell
///   (`adb -s <serial> shell <cmd>`)
/// - `Raw`: top-level adb arguments scoped to the device
///   (`adb -s <serial> <args...>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdbInvocation {
    Shell(String),
    Raw(Vec<String>),
}

impl AdbInvocation {
    /// Classify a command string into an invocation.
    ///
    /// `"adb shell <x>"` strips the marker and runs `<x>` on the device
    /// shell; `"adb <x> <y>"` strips the marker and re-splits the remainder
    /// as top-level adb arguments; anything else is a device shell command
    /// as-is.
    pub fn classify(command: &str) -> Self {
        if command == "adb shell" {
            return Self::Shell(String::new());
        }
        if let Some(rest) = command.strip_prefix("adb shell ") {
            return Self::Shell(rest.trim_start().to_string());
        }
        if let Some(rest) = command.strip_prefix("adb ") {
            return Self::Raw(rest.split_whitespace().map(String::from).collect());
        }
        Self::Shell(command.to_string())
    }

    /// Build the adb argument vector for this invocation, scoped to `serial`.
    ///
    /// A `Shell` command line is passed as a single token; the on-device
    /// shell does its own word splitting.
    pub fn argv(&self, serial: &str) -> Vec<String> {
        let mut argv = vec!["-s".to_string(), serial.to_string()];
        match self {
            Self::Shell(command) => {
                argv.push("shell".to_string());
                argv.push(command.clone());
            }
            Self::Raw(args) => argv.extend(args.iter().cloned()),
        }
        argv
    }
}

/// Captured result of one process invocation.
///
/// Standard error is not captured; error messages embed the attempted
/// command line instead.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl RunOutput {
    /// Human-readable failure reason for a completed process.
    pub fn failure_reason(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Process-execution seam for device commands.
///
/// One external process per call, blocking until exit, no retry.
pub trait CommandRunner: Send + Sync {
    fn output(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = io::Result<RunOutput>> + Send;
}

/// Spawns real processes via tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn output(&self, program: &str, args: &[String]) -> io::Result<RunOutput> {
        let output = Command::new(program).args(args).output().await?;
        Ok(RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_shell_prefix() {
        let inv = AdbInvocation::classify("adb shell ls /sdcard");
        assert_eq!(inv, AdbInvocation::Shell("ls /sdcard".to_string()));
    }

    #[test]
    fn test_classify_adb_prefix() {
        let inv = AdbInvocation::classify("adb devices -l");
        assert_eq!(
            inv,
            AdbInvocation::Raw(vec!["devices".to_string(), "-l".to_string()])
        );
    }

    #[test]
    fn test_classify_bare_command() {
        let inv = AdbInvocation::classify("pm list packages");
        assert_eq!(inv, AdbInvocation::Shell("pm list packages".to_string()));
    }

    #[test]
    fn test_classify_requires_marker_boundary() {
        // "adb shells" is not the shell marker; it is top-level adb args
        let inv = AdbInvocation::classify("adb shells foo");
        assert_eq!(
            inv,
            AdbInvocation::Raw(vec!["shells".to_string(), "foo".to_string()])
        );
    }

    #[test]
    fn test_argv_shell() {
        let argv = AdbInvocation::Shell("ls /sdcard".to_string()).argv("emulator-5554");
        assert_eq!(argv, vec!["-s", "emulator-5554", "shell", "ls /sdcard"]);
    }

    #[test]
    fn test_argv_raw() {
        let argv =
            AdbInvocation::Raw(vec!["devices".to_string(), "-l".to_string()]).argv("abc123");
        assert_eq!(argv, vec!["-s", "abc123", "devices", "-l"]);
    }

    #[test]
    fn test_argv_bare_string_runs_on_device_shell() {
        let argv = AdbInvocation::classify("input tap 100 200").argv("abc123");
        assert_eq!(argv, vec!["-s", "abc123", "shell", "input tap 100 200"]);
    }
}
