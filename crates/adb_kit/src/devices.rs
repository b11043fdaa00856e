//! Host-side device listing

use crate::command::{CommandRunner, ProcessRunner};
use crate::error::{AdbError, Result};
use serde::Serialize;

/// A device known to the adb server
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub serial: String,
    /// adb-reported state, e.g. `device`, `offline`, `unauthorized`
    pub status: String,
    pub model: Option<String>,
}

/// List devices known to the adb server (`adb devices -l`).
pub async fn list_devices(adb_path: &str) -> Result<Vec<DeviceInfo>> {
    let args: Vec<String> = ["devices", "-l"].iter().map(|s| s.to_string()).collect();
    let command = format!("{} devices -l", adb_path);

    let output = ProcessRunner
        .output(adb_path, &args)
        .await
        .map_err(|err| AdbError::CommandExecution {
            command: command.clone(),
            reason: err.to_string(),
        })?;
    if !output.success {
        return Err(AdbError::CommandExecution {
            command,
            reason: output.failure_reason(),
        });
    }

    Ok(parse_device_list(&output.stdout))
}

fn parse_device_list(output: &str) -> Vec<DeviceInfo> {
    let mut devices = Vec::new();

    // First line is the "List of devices attached" header.
    for line in output.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let mut model = None;
        for part in &parts[2..] {
            if let Some(value) = part.strip_prefix("model:") {
                model = Some(value.to_string());
                break;
            }
        }

        devices.push(DeviceInfo {
            serial: parts[0].to_string(),
            status: parts[1].to_string(),
            model,
        });
    }

    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_list() {
        let output = "List of devices attached\n\
                      emulator-5554          device product:sdk_gphone64 model:sdk_gphone64_x86_64 device:emu64x\n\
                      192.168.1.20:5555      offline\n\n";
        let devices = parse_device_list(output);
        assert_eq!(devices.len(), 2);

        assert_eq!(devices[0].serial, "emulator-5554");
        assert_eq!(devices[0].status, "device");
        assert_eq!(devices[0].model.as_deref(), Some("sdk_gphone64_x86_64"));

        assert_eq!(devices[1].serial, "192.168.1.20:5555");
        assert_eq!(devices[1].status, "offline");
        assert!(devices[1].model.is_none());
    }

    #[test]
    fn test_parse_device_list_empty() {
        assert!(parse_device_list("List of devices attached\n\n").is_empty());
    }
}
