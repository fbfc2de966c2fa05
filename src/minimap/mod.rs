pub mod locator;
pub mod palette;
pub mod reader;
pub mod region;

pub use locator::{ColorLocator, ColorMatch, CountResult};
pub use palette::Palette;
pub use reader::{MinimapReader, MinimapSnapshot, OtherCounts};
pub use region::Region;
