pub mod alert;
pub mod debug;
pub mod source;

pub use alert::{AlertSink, TracingAlertSink};
pub use debug::{DebugImageSink, PngDebugSink};
pub use source::{ChannelOrder, FrameSource, ImageFileSource};
