use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

use crate::capture::ChannelOrder;
use crate::error::{AppError, RegionError};
use crate::minimap::{Palette, Region};

pub const DEFAULT_CONFIG_PATH: &str = "minimap.toml";
pub const ENV_PREFIX: &str = "MINIMAP";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub region: RegionSettings,
    pub palette: Palette,
    pub source: SourceSettings,
    pub debug: DebugSettings,
    pub watch: WatchSettings,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: RegionSettings::default(),
            palette: Palette::default(),
            source: SourceSettings::default(),
            debug: DebugSettings::default(),
            watch: WatchSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Mini-map bounds inside the captured window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegionSettings {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
    pub padding: Padding,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            top: 0,
            left: 0,
            bottom: 1,
            right: 1,
            padding: Padding::default(),
        }
    }
}

impl RegionSettings {
    pub fn to_region(&self) -> Result<Region, RegionError> {
        Ok(Region::new(self.top, self.left, self.bottom, self.right)?
            .padded(self.padding.bottom, self.padding.right))
    }
}

/// Extra rows/columns added to the bottom and right bounds, for window chrome.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub bottom: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub path: PathBuf,
    pub channel_order: ChannelOrder,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("capture.png"),
            channel_order: ChannelOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Directory cropped mini-maps are written to. Disabled when unset.
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub interval_ms: u64,
    /// Stop after this many snapshots. Runs until interrupted when unset.
    pub max_frames: Option<u64>,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            max_frames: None,
        }
    }
}

impl WatchSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Settings {
    /// Loads settings from an optional config file, overridden by
    /// `MINIMAP_*` environment variables (`__` separates sections).
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let settings: Settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.watch.interval_ms == 0 {
            return Err(AppError::Config(::config::ConfigError::Message(
                "watch.interval_ms must be greater than 0".to_string(),
            )));
        }
        self.region.to_region()?;
        Ok(())
    }

    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}
