/// Error types for ADB operations
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdbError {
    #[error("Command execution failed ({command}): {reason}")]
    CommandExecution { command: String, reason: String },

    #[error("File transfer failed ({command}): {reason}")]
    RemoteTransfer { command: String, reason: String },

    #[error("Remote cleanup failed ({path}): {reason}")]
    RemoteCleanup { path: String, reason: String },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("UI dump failed: {0}")]
    UiDump(String),

    #[error("Failed to parse UI dump {path}: {source}")]
    UiParse {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdbError>;
