use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Frame Error: {0}")]
    Frame(#[from] FrameError),
    #[error("Region Error: {0}")]
    Region(#[from] RegionError),
    #[error("Configuration Error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Coordinator is missing {0}")]
    Incomplete(&'static str),
}

// Frame acquisition Error Type
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Frame unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("Region is inverted: top {top}, left {left}, bottom {bottom}, right {right}")]
    Inverted {
        top: u32,
        left: u32,
        bottom: u32,
        right: u32,
    },
    #[error("Region has zero width or height")]
    Empty,
    #[error("Region ends at ({right}, {bottom}) but the frame is {width}x{height}")]
    OutOfBounds {
        bottom: u32,
        right: u32,
        width: u32,
        height: u32,
    },
}
