//! Gesture Volume - webcam pinch control for the system master volume

use anyhow::{Context, Result};
use clap::Parser;
use gesture_volume::capture::synthetic::{SYNTHETIC_HEIGHT, SYNTHETIC_WIDTH};
use gesture_volume::config::DETECTION_CONFIDENCE;
use gesture_volume::ui::VolumeControlApp;
use gesture_volume::{
    audio, capture, detector, init_logging, ui, GestureConfig, RuntimeSettings,
    VolumeController, VolumeMapper,
};
use tracing::info;

/// Control the master volume by spreading your index and middle fingers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera device index (non-negative; negative values are rejected as usage errors)
    #[arg(long, env = "GESTURE_VOLUME_CAMERA", default_value_t = 0)]
    camera: u32,

    /// Never touch the audio device (display-only)
    #[arg(long, env = "GESTURE_VOLUME_NO_AUDIO")]
    no_audio: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&level)?;

    info!("Starting Gesture Volume v{}...", env!("CARGO_PKG_VERSION"));

    let config = GestureConfig::default()
        .validate()
        .context("Invalid gesture configuration")?;
    let settings = RuntimeSettings::new(args.camera, args.no_audio);
    info!(
        "🖐️  Calibration: {:.0}..{:.0} px, alpha {:.2}, camera #{}",
        config.bounds.min(),
        config.bounds.max(),
        config.alpha.get(),
        settings.camera_index
    );

    let audio = audio::negotiate(settings.no_audio);

    let source = capture::open_source(settings.camera_index)
        .with_context(|| format!("Cannot open camera #{}", settings.camera_index))?;
    let landmarks = detector::open_detector(&settings.model_path, DETECTION_CONFIDENCE);

    let controller = VolumeController::new(VolumeMapper::from_config(&config), audio);
    let app = VolumeControlApp::new(source, landmarks, controller, config.mirror);

    ui::run_window(app, [SYNTHETIC_WIDTH as f32, SYNTHETIC_HEIGHT as f32])?;

    info!("Gesture Volume shutdown complete");
    Ok(())
}
