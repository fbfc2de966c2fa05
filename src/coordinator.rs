use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::{
    capture::{AlertSink, FrameSource, TracingAlertSink},
    error::{AppError, FrameError},
    minimap::{MinimapReader, MinimapSnapshot},
};

/// Polls a frame source, reads the mini-map of every frame and writes one
/// JSON snapshot per line to its output.
pub struct Coordinator {
    source: Box<dyn FrameSource>,
    reader: MinimapReader,
    alert: Arc<dyn AlertSink>,
    interval: Duration,
    max_frames: Option<u64>,
    output: Box<dyn Write + Send>,
}

impl Coordinator {
    /// Captures and reads a single frame.
    ///
    /// Returns `Ok(None)` when the capture could not be decoded, which happens
    /// when the capture tool is mid-write; the next tick retries.
    pub fn process_frame(&mut self) -> Result<Option<MinimapSnapshot>, AppError> {
        let frame = match self.source.capture() {
            Ok(frame) => frame,
            Err(FrameError::Decode(e)) => {
                warn!("Skipping undecodable frame: {}", e);
                return Ok(None);
            }
            Err(e) => {
                self.alert.frame_unavailable(&e);
                return Err(e.into());
            }
        };

        self.reader
            .locator()
            .region()
            .check_fits(frame.width(), frame.height())?;

        let snapshot = self.reader.snapshot(&frame);
        info!(
            frame_id = %snapshot.frame_id,
            player = ?snapshot.player,
            rune = ?snapshot.rune,
            portal = snapshot.portal,
            "Mini-map read"
        );
        serde_json::to_writer(&mut self.output, &snapshot)?;
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(Some(snapshot))
    }

    /// Runs until `max_frames` snapshots were written or an error stops the
    /// loop. Returns the number of snapshots written.
    pub async fn run(&mut self) -> Result<u64, AppError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut written = 0;
        while self.max_frames.map_or(true, |max| written < max) {
            ticker.tick().await;
            if self.process_frame()?.is_some() {
                written += 1;
            }
        }
        info!("Stopping after {} snapshots", written);
        Ok(written)
    }
}

pub struct CoordinatorBuilder {
    reader: MinimapReader,
    source: Option<Box<dyn FrameSource>>,
    alert: Arc<dyn AlertSink>,
    interval: Duration,
    max_frames: Option<u64>,
    output: Box<dyn Write + Send>,
}

impl CoordinatorBuilder {
    pub fn new(reader: MinimapReader) -> Self {
        Self {
            reader,
            source: None,
            alert: Arc::new(TracingAlertSink),
            interval: Duration::from_millis(500),
            max_frames: None,
            output: Box::new(std::io::stdout()),
        }
    }

    pub fn source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replaces the default log-only alert sink.
    pub fn alert_sink(mut self, alert: Arc<dyn AlertSink>) -> Self {
        self.alert = alert;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Snapshots go to stdout unless redirected here.
    pub fn output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        let source = self
            .source
            .ok_or(AppError::Incomplete("a frame source"))?;
        Ok(Coordinator {
            source,
            reader: self.reader,
            alert: self.alert,
            interval: self.interval,
            max_frames: self.max_frames,
            output: self.output,
        })
    }
}
