use serde::{Deserialize, Serialize};

/// A 4-channel color value to search for. Matching is exact on all channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorQuery(pub [u8; 4]);

impl ColorQuery {
    pub const fn new(c0: u8, c1: u8, c2: u8, c3: u8) -> Self {
        Self([c0, c1, c2, c3])
    }

    #[inline]
    pub fn matches(&self, pixel: &[u8]) -> bool {
        pixel == self.0
    }
}

impl From<[u8; 4]> for ColorQuery {
    fn from(channels: [u8; 4]) -> Self {
        Self(channels)
    }
}

impl std::fmt::Display for ColorQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [c0, c1, c2, c3] = self.0;
        write!(f, "({c0}, {c1}, {c2}, {c3})")
    }
}

/// Mean position of the matching pixels, in crop-local coordinates
/// (x = column, y = row, origin at the crop's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Location {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
