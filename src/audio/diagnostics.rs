//! Audio backend diagnostics for troubleshooting volume control

use super::{open_default_sink, AudioError, AudioSink};
use crate::volume::percent;
use colored::*;

/// What the diagnostic found
#[derive(Debug, Clone, PartialEq)]
pub struct AudioProbe {
    pub platform: &'static str,
    /// Backend name, or why it could not be constructed
    pub backend: Result<String, AudioError>,
    /// Master volume read back from the backend, if it was constructed
    pub volume: Option<Result<f32, AudioError>>,
}

impl AudioProbe {
    pub fn is_usable(&self) -> bool {
        matches!(self.volume, Some(Ok(_)))
    }
}

/// Probe a backend constructor without changing the volume
pub fn probe_with<F>(open: F) -> AudioProbe
where
    F: FnOnce() -> Result<Box<dyn AudioSink>, AudioError>,
{
    match open() {
        Ok(sink) => AudioProbe {
            platform: std::env::consts::OS,
            backend: Ok(sink.name().to_string()),
            volume: Some(sink.volume()),
        },
        Err(e) => AudioProbe {
            platform: std::env::consts::OS,
            backend: Err(e),
            volume: None,
        },
    }
}

/// Probe the platform backend
pub fn probe() -> AudioProbe {
    probe_with(open_default_sink)
}

/// Print a human-readable report of the probe
pub fn print_audio_diagnostics(probe: &AudioProbe) {
    println!("\n{}", "=== Audio Diagnostics ===".bold().cyan());
    println!("  Platform: {}", probe.platform.yellow());

    match &probe.backend {
        Ok(name) => println!("  Backend:  {} {}", "✅".green(), name.green()),
        Err(e) => {
            println!("  Backend:  {} {}", "❌".red(), e.to_string().red());
            if matches!(e, AudioError::Unsupported { .. }) {
                println!("  Master volume control is only available on Windows.");
            }
            println!("  Run the controller with --no-audio for display-only mode.");
            return;
        },
    }

    match &probe.volume {
        Some(Ok(v)) => println!(
            "  Master volume: {}",
            format!("{}%", percent(*v)).green()
        ),
        Some(Err(e)) => println!("  Master volume: {}", e.to_string().red()),
        None => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSink;

    impl AudioSink for FixedSink {
        fn name(&self) -> &str {
            "fixed"
        }

        fn read_scalar(&self) -> Result<f32, AudioError> {
            Ok(0.75)
        }

        fn write_scalar(&mut self, _level: f32) -> Result<(), AudioError> {
            panic!("diagnostics must not change the volume");
        }
    }

    #[test]
    fn test_probe_reads_volume() {
        let probe = probe_with(|| Ok(Box::new(FixedSink) as Box<dyn AudioSink>));
        assert_eq!(probe.backend, Ok("fixed".to_string()));
        assert_eq!(probe.volume, Some(Ok(0.75)));
        assert!(probe.is_usable());
    }

    #[test]
    fn test_probe_reports_construction_failure() {
        let probe = probe_with(|| Err(AudioError::Unsupported { platform: "plan9" }));
        assert!(probe.backend.is_err());
        assert_eq!(probe.volume, None);
        assert!(!probe.is_usable());
    }
}
