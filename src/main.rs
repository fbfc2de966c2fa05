use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use minimap_locator::capture::{ImageFileSource, PngDebugSink, TracingAlertSink};
use minimap_locator::config::Settings;
use minimap_locator::{AppError, ColorLocator, CoordinatorBuilder, MinimapReader};
use tracing::{info, Level};

#[derive(Debug, Parser)]
pub struct Args {
    /// Settings file; `minimap.toml` in the working directory when omitted.
    #[arg()]
    pub config: Option<PathBuf>,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(settings.log_level());

    let region = settings.region.to_region()?;
    info!("Watching mini-map region {:?}", region);

    let mut locator = ColorLocator::new(region);
    if let Some(dir) = &settings.debug.snapshot_dir {
        locator = locator.with_debug_sink(Arc::new(PngDebugSink::new(dir)));
    }
    let reader = MinimapReader::new(locator, settings.palette.clone());

    let mut coordinator = CoordinatorBuilder::new(reader)
        .source(Box::new(ImageFileSource::new(
            &settings.source.path,
            settings.source.channel_order,
        )))
        .alert_sink(Arc::new(TracingAlertSink))
        .interval(settings.watch.interval())
        .max_frames(settings.watch.max_frames)
        .build()?;

    tokio::select! {
        result = coordinator.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }
    Ok(())
}
