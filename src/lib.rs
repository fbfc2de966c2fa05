pub mod capture;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod minimap;

pub use error::{AppError, FrameError, RegionError};

pub use common::{ColorQuery, Frame, Location};
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use minimap::{ColorLocator, CountResult, MinimapReader, Palette, Region};
