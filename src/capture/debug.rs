//! Persistence of cropped mini-map images for diagnostics.
use image::{ImageError, RgbaImage};
use std::path::{Path, PathBuf};

/// Receives the cropped image of every scan. Purely diagnostic: failures are
/// reported back but never change a scan result.
pub trait DebugImageSink: Send + Sync {
    fn persist(&self, label: &str, crop: &RgbaImage) -> Result<(), ImageError>;
}

/// Writes each crop as `<dir>/minimap_<label>.png`, overwriting the previous one.
pub struct PngDebugSink {
    dir: PathBuf,
}

impl PngDebugSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("minimap_{label}.png"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DebugImageSink for PngDebugSink {
    fn persist(&self, label: &str, crop: &RgbaImage) -> Result<(), ImageError> {
        std::fs::create_dir_all(&self.dir).map_err(ImageError::IoError)?;
        crop.save_with_format(self.path_for(label), image::ImageFormat::Png)
    }
}
