//! adbkit - structured Android device operations from the command line
//!
//! Usage:
//!     adbkit [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     ADBKIT_DEVICE_ID: device serial for multi-device setups
//!     ADBKIT_ADB_PATH: adb executable (default: adb)
//!     ADBKIT_WORK_DIR: scratch/output directory (default: .)
//!     ADBKIT_SCALE_FACTOR: screenshot downsample factor (default: 0.3)

use adb_kit::{list_devices, AdbRepo, PackageFilter, RepoConfig};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Structured Android device operations over ADB
#[derive(Parser, Debug)]
#[command(name = "adbkit")]
#[command(about = "Structured Android device operations over ADB")]
#[command(after_help = r#"Examples:
    # List connected devices
    adbkit devices

    # List third-party packages on the only connected device
    adbkit packages --filter third-party

    # Intent actions a package declares
    adbkit actions com.android.settings

    # Run a raw command ("adb shell ..." and "adb ..." prefixes are recognized)
    adbkit exec input tap 540 1200

    # Capture a downsampled screenshot into the work dir
    adbkit --work-dir /tmp/adbkit screenshot

    # Clickable elements of the current screen, as JSON
    adbkit uilayout --json
"#)]
struct Cli {
    /// ADB device serial (auto-selected when exactly one device is connected)
    #[arg(short = 'd', long, env = "ADBKIT_DEVICE_ID")]
    device_id: Option<String>,

    /// Path to the adb executable
    #[arg(long, env = "ADBKIT_ADB_PATH", default_value = "adb")]
    adb_path: String,

    /// Directory for scratch files and outputs
    #[arg(long, env = "ADBKIT_WORK_DIR", default_value = ".")]
    work_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List devices known to the adb server
    Devices {
        /// Emit JSON instead of a plain listing
        #[arg(long)]
        json: bool,
    },
    /// List installed packages
    Packages {
        /// Restrict the listing
        #[arg(long, value_parser = ["third-party", "system", "apk-path", "disabled", "enabled", "uninstalled"])]
        filter: Option<String>,
    },
    /// Show the non-data intent actions a package declares
    Actions {
        package: String,
        #[arg(long)]
        json: bool,
    },
    /// Run a raw adb command against the device
    Exec {
        /// Command tokens, joined and classified like "adb shell <x>" / "adb <x>" / "<x>"
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Capture and downsample a screenshot
    Screenshot {
        /// Downsample factor applied to both dimensions
        #[arg(long)]
        scale: Option<f32>,
    },
    /// Extract clickable elements from the current UI
    Uilayout {
        #[arg(long)]
        json: bool,
    },
    /// Read recent device log lines for a tag
    Logcat {
        keyword: String,
        /// Number of most recent lines to fetch
        #[arg(short = 'n', long, default_value = "100")]
        lines: u32,
    },
}

fn parse_filter(value: &str) -> Option<PackageFilter> {
    match value {
        "third-party" => Some(PackageFilter::ThirdParty),
        "system" => Some(PackageFilter::System),
        "apk-path" => Some(PackageFilter::WithApkPath),
        "disabled" => Some(PackageFilter::Disabled),
        "enabled" => Some(PackageFilter::Enabled),
        "uninstalled" => Some(PackageFilter::IncludeUninstalled),
        _ => None,
    }
}

/// Pick the device to operate on: an explicit serial wins, otherwise the
/// single online device.
async fn resolve_device(adb_path: &str, requested: Option<String>) -> Result<String> {
    if let Some(serial) = requested {
        return Ok(serial);
    }

    let devices = list_devices(adb_path).await?;
    let online: Vec<_> = devices.iter().filter(|d| d.status == "device").collect();
    match online.len() {
        0 => bail!("no devices connected"),
        1 => Ok(online[0].serial.clone()),
        n => bail!("{} devices connected; pass --device-id to pick one", n),
    }
}

async fn print_devices(adb_path: &str, json: bool) -> Result<()> {
    let devices = list_devices(adb_path).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
    } else if devices.is_empty() {
        println!("No devices connected.");
    } else {
        for device in devices {
            let model = device
                .model
                .map(|m| format!(" ({})", m))
                .unwrap_or_default();
            println!("  {:<28} {}{}", device.serial, device.status, model);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    if which::which(&args.adb_path).is_err() {
        bail!(
            "{} is not installed or not in PATH; install android-platform-tools",
            args.adb_path
        );
    }

    // Device listing is host-scoped and needs no serial.
    if let Command::Devices { json } = &args.command {
        return print_devices(&args.adb_path, *json).await;
    }

    let serial = resolve_device(&args.adb_path, args.device_id.clone()).await?;
    let config = RepoConfig {
        adb_path: args.adb_path.clone(),
        work_dir: args.work_dir.clone(),
        ..RepoConfig::default()
    };
    let repo = AdbRepo::new(serial).with_config(config);

    match args.command {
        Command::Devices { .. } => unreachable!("handled above"),
        Command::Packages { filter } => {
            let filter = filter.as_deref().and_then(parse_filter);
            print!("{}", repo.list_packages(filter).await?);
        }
        Command::Actions { package, json } => {
            let actions = repo.get_actions(&package).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
            } else {
                for action in actions {
                    println!("{}", action);
                }
            }
        }
        Command::Exec { args } => {
            print!("{}", repo.execute_args(&args).await?);
        }
        Command::Screenshot { scale } => {
            let repo = match scale {
                Some(factor) => repo.with_scale_factor(factor),
                None => repo,
            };
            let path = repo.take_screenshot().await?;
            println!("Screenshot written to {}", path.display());
        }
        Command::Uilayout { json } => {
            if json {
                let elements = repo.get_ui_elements().await?;
                println!("{}", serde_json::to_string_pretty(&elements)?);
            } else {
                println!("{}", repo.get_ui_layout().await?);
            }
        }
        Command::Logcat { keyword, lines } => {
            print!("{}", repo.logcat(&keyword, lines).await?);
        }
    }

    Ok(())
}
