//! Screenshot pipeline: capture, pull, remote cleanup, downsample

use crate::command::CommandRunner;
use crate::config::{COMPRESSED_SCREENSHOT_FILE, RAW_SCREENSHOT_FILE};
use crate::error::{AdbError, Result};
use crate::repo::AdbRepo;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

impl<R: CommandRunner> AdbRepo<R> {
    /// Capture the device screen and write a downsampled copy to
    /// `compressed_screenshot.png` in the work dir, returning its path.
    ///
    /// The raw capture stays at `screenshot.png` in the work dir as scratch
    /// space. The remote capture file is removed on every exit path once the
    /// capture command has been issued; a cleanup failure fails the
    /// operation even after a successful pull.
    pub async fn take_screenshot(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(self.work_dir())?;
        let remote = self.remote_scratch_path("screenshot", "png");
        let raw = self.work_dir().join(RAW_SCREENSHOT_FILE);
        let compressed = self.work_dir().join(COMPRESSED_SCREENSHOT_FILE);

        let fetched = self.capture_and_pull(&remote, &raw).await;
        let cleanup = self.remove_remote(&remote).await;
        fetched?;
        cleanup?;

        debug!("decoding {}", raw.display());
        let img = image::open(&raw).map_err(|source| AdbError::ImageDecode {
            path: raw.clone(),
            source,
        })?;

        let resized = downscale(&img, self.scale_factor());
        debug!(
            "writing {} ({}x{})",
            compressed.display(),
            resized.width(),
            resized.height()
        );
        resized
            .save(&compressed)
            .map_err(|source| AdbError::ImageEncode {
                path: compressed.clone(),
                source,
            })?;

        Ok(compressed)
    }

    async fn capture_and_pull(&self, remote: &str, raw: &Path) -> Result<()> {
        self.shell(&format!("screencap -p {}", remote)).await?;
        self.pull(remote, raw).await
    }
}

/// Downsample both dimensions by `factor` with Lanczos resampling.
fn downscale(img: &DynamicImage, factor: f32) -> DynamicImage {
    let (width, height) = scaled_dimensions(img.width(), img.height(), factor);
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// New dimensions after scaling, integer-truncated to device pixels.
fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    (
        (width as f64 * factor as f64) as u32,
        (height as f64 * factor as f64) as u32,
    )
}
