pub mod color;
pub mod frame;

pub use color::{ColorQuery, Location};
pub use frame::Frame;
