use image::{imageops, RgbaImage};

use crate::error::RegionError;

/// Rectangular sub-window of a frame: rows `top..bottom`, columns `left..right`.
///
/// Tuples written for a `[rows, columns]` array slice as `img[left:right, top:bottom]`
/// describe the transpose: build them as `Region::new(left, top, right, bottom)` and
/// swap their bottom/right padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    top: u32,
    left: u32,
    bottom: u32,
    right: u32,
}

impl Region {
    pub fn new(top: u32, left: u32, bottom: u32, right: u32) -> Result<Self, RegionError> {
        if bottom < top || right < left {
            return Err(RegionError::Inverted {
                top,
                left,
                bottom,
                right,
            });
        }
        if bottom == top || right == left {
            return Err(RegionError::Empty);
        }
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    /// Grows the bottom and right bounds, e.g. to compensate for window chrome.
    pub fn padded(self, bottom: u32, right: u32) -> Self {
        Self {
            bottom: self.bottom.saturating_add(bottom),
            right: self.right.saturating_add(right),
            ..self
        }
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn left(&self) -> u32 {
        self.left
    }

    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn right(&self) -> u32 {
        self.right
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }

    pub fn check_fits(&self, width: u32, height: u32) -> Result<(), RegionError> {
        if self.fits(width, height) {
            Ok(())
        } else {
            Err(RegionError::OutOfBounds {
                bottom: self.bottom,
                right: self.right,
                width,
                height,
            })
        }
    }

    /// Copies the region out of `image`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not lie inside `image`. Callers are expected
    /// to check [`Region::fits`] against the real frame first.
    pub fn crop(&self, image: &RgbaImage) -> RgbaImage {
        let (width, height) = image.dimensions();
        assert!(
            self.fits(width, height),
            "region {:?} does not fit inside a {}x{} frame",
            self,
            width,
            height
        );
        imageops::crop_imm(image, self.left, self.top, self.width(), self.height()).to_image()
    }
}
