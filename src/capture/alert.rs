use tracing::error;

use crate::error::FrameError;

/// Notified when the game window can no longer be captured.
pub trait AlertSink: Send + Sync {
    fn frame_unavailable(&self, error: &FrameError);
}

/// Reports capture loss through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn frame_unavailable(&self, error: &FrameError) {
        error!("Game window lost: {}", error);
    }
}
