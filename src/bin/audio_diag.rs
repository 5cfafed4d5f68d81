//! Audio backend diagnostics
//!
//! Opens the default output device the same way the main program does and
//! reports whether the master volume can be read.

use anyhow::Result;
use gesture_volume::audio::diagnostics::{print_audio_diagnostics, probe};
use gesture_volume::init_logging;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    init_logging(&level)?;

    let report = probe();
    print_audio_diagnostics(&report);

    if !report.is_usable() {
        std::process::exit(1);
    }
    Ok(())
}
