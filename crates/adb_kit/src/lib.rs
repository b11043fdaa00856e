//! adb_kit: structured Android device operations over ADB
//!
//! This library turns a remote Android device, reached through the adb
//! debug bridge, into a set of reliable, structured operations:
//! - arbitrary shell/adb command execution scoped to one device serial
//! - installed-package listing and intent-action extraction
//! - screenshot capture with local downsampling
//! - clickable-element extraction from the accessibility tree, with
//!   computed tap centers
//!
//! Every remote scratch file a pipeline creates is deleted from the device
//! before the operation returns, success or failure.
//!
//! # Example
//!
//! ```no_run
//! use adb_kit::AdbRepo;
//!
//! #[tokio::main]
//! async fn main() -> adb_kit::Result<()> {
//!     let repo = AdbRepo::new("emulator-5554").with_work_dir("/tmp/adbkit");
//!
//!     let packages = repo.list_packages(None).await?;
//!     println!("{}", packages);
//!
//!     let screenshot = repo.take_screenshot().await?;
//!     println!("screenshot at {}", screenshot.display());
//!
//!     println!("{}", repo.get_ui_layout().await?);
//!     Ok(())
//! }
//! ```

mod command;
mod config;
mod devices;
mod error;
mod packages;
mod repo;
mod screenshot;
mod uilayout;

#[cfg(test)]
mod test_support;

pub use command::{AdbInvocation, CommandRunner, ProcessRunner, RunOutput};
pub use config::{
    RepoConfig, COMPRESSED_SCREENSHOT_FILE, DEFAULT_SCALE_FACTOR, RAW_SCREENSHOT_FILE,
    UI_DUMP_FILE,
};
pub use devices::{list_devices, DeviceInfo};
pub use error::{AdbError, Result};
pub use packages::PackageFilter;
pub use repo::AdbRepo;
pub use uilayout::{parse_center, Point, ScreenElement, NO_ELEMENTS_MESSAGE};
