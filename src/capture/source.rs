use image::RgbaImage;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::Frame;
use crate::error::FrameError;

/// Supplies full window frames on demand.
pub trait FrameSource: Send {
    fn capture(&mut self) -> Result<Frame, FrameError>;
}

/// Channel layout frames are handed out in. Palette colors must use the same
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Rgba,
    #[default]
    Bgra,
}

impl ChannelOrder {
    /// Reorders an RGBA image in place into this layout.
    pub fn apply(self, image: &mut RgbaImage) {
        if self == ChannelOrder::Bgra {
            for pixel in image.pixels_mut() {
                pixel.0.swap(0, 2);
            }
        }
    }
}

/// Reads the latest screenshot of the game window from a file that some
/// external capture tool keeps overwriting.
pub struct ImageFileSource {
    path: PathBuf,
    channel_order: ChannelOrder,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>, channel_order: ChannelOrder) -> Self {
        Self {
            path: path.into(),
            channel_order,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for ImageFileSource {
    fn capture(&mut self) -> Result<Frame, FrameError> {
        if !self.path.is_file() {
            return Err(FrameError::Unavailable(format!(
                "no capture at {}",
                self.path.display()
            )));
        }
        let mut image = image::open(&self.path)?.to_rgba8();
        self.channel_order.apply(&mut image);
        debug!(
            "Captured {}x{} frame from {}",
            image.width(),
            image.height(),
            self.path.display()
        );
        Ok(Frame::captured(image))
    }
}
