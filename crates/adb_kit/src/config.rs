//! Repository configuration with environment overrides

use std::env;
use std::path::PathBuf;

/// Local file name of the raw screenshot pulled from the device.
///
/// The raw capture is left in the work dir after a successful pipeline run;
/// it is scratch space, not a leak.
pub const RAW_SCREENSHOT_FILE: &str = "screenshot.png";

/// Local file name of the downsampled screenshot.
pub const COMPRESSED_SCREENSHOT_FILE: &str = "compressed_screenshot.png";

/// Local file name of the pulled UI dump.
pub const UI_DUMP_FILE: &str = "window_dump.xml";

/// Default downsample factor applied to screenshots.
pub const DEFAULT_SCALE_FACTOR: f32 = 0.3;

/// Configuration for an [`AdbRepo`](crate::AdbRepo) handle
#[derive(Debug, Clone)]
pub struct RepoConfig {
    /// Path to the adb executable
    pub adb_path: String,
    /// Directory for local scratch files (raw screenshot, UI dump) and outputs
    pub work_dir: PathBuf,
    /// Screenshot downsample factor, applied to both dimensions
    pub scale_factor: f32,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            adb_path: env::var("ADBKIT_ADB_PATH").unwrap_or_else(|_| "adb".to_string()),
            work_dir: env::var("ADBKIT_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            scale_factor: env::var("ADBKIT_SCALE_FACTOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SCALE_FACTOR),
        }
    }
}
