//! Video window with the gesture overlay
//!
//! Runs on the main thread and blocks until the window closes.

mod app;
pub mod drawing;
pub mod fps;

pub use app::{StopReason, VolumeControlApp};

use anyhow::{anyhow, Result};

pub const WINDOW_TITLE: &str = "Volume Control (press ESC to quit)";

/// Open the window and drive `app` until it is closed
pub fn run_window(app: VolumeControlApp, initial_size: [f32; 2]) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(initial_size)
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("Window error: {}", e))
}
