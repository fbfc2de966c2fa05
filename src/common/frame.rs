use chrono::{DateTime, Utc};
use image::RgbaImage;
use std::sync::Arc;
use uuid::Uuid;

/// A captured full window image. Pixels are 4-channel, row-major; the
/// channel order is whatever the source produced.
#[derive(Clone)]
pub struct Frame {
    image: Arc<RgbaImage>,
    captured_at: DateTime<Utc>,
    frame_id: Uuid,
}

impl Frame {
    pub fn new(image: RgbaImage, captured_at: DateTime<Utc>, frame_id: Uuid) -> Self {
        Self {
            image: Arc::new(image),
            captured_at,
            frame_id,
        }
    }

    /// Wraps a freshly captured image, stamping it with the current time.
    pub fn captured(image: RgbaImage) -> Self {
        Self::new(image, Utc::now(), Uuid::new_v4())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn get_frame_id(&self) -> Uuid {
        self.frame_id
    }

    pub fn get_captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("frame_id", &self.frame_id)
            .field("captured_at", &self.captured_at)
            .field("dimensions", &self.image.dimensions())
            .finish()
    }
}
