//! Gesture Volume - control the master volume with a two-finger pinch
//!
//! A webcam frame goes through a hand-landmark detector; the distance between
//! the raised index and middle fingertips is mapped onto [0, 1], smoothed, and
//! written to the default audio output. Without a usable audio device the
//! same pipeline runs display-only.

pub mod audio;
pub mod capture;
pub mod config;
pub mod controller;
pub mod detector;
pub mod gesture;
pub mod ui;
pub mod volume;

pub use config::{ConfigError, GestureConfig, RuntimeSettings, ValidatedConfig};
pub use controller::{FrameReport, GestureStatus, VolumeController};
pub use volume::{SmoothedVolume, VolumeMapper};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the fmt subscriber; `RUST_LOG` overrides `level` when set
pub fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .try_init()?;

    Ok(())
}
