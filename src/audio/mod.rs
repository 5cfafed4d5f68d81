//! Master-volume output
//!
//! The controller talks to the OS mixer through [`AudioSink`]. Exactly one
//! backend exists (Windows Core Audio endpoint volume). Whether it is usable
//! is decided once at startup by [`negotiate`]; on failure the app keeps
//! running in display-only mode and never touches the mixer.

pub mod diagnostics;
#[cfg(windows)]
pub mod endpoint;

use thiserror::Error;
use tracing::{info, warn};

/// Audio backend errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("master volume control is not supported on {platform}")]
    Unsupported { platform: &'static str },

    #[error("no audio output device found: {0}")]
    DeviceNotFound(String),

    #[error("audio backend call failed: {0}")]
    Backend(String),

    #[error("refusing to apply non-finite volume level {0}")]
    InvalidLevel(f32),
}

/// Scalar master-volume control
///
/// Implementors provide the raw reads and writes; callers go through
/// [`AudioSink::volume`] and [`AudioSink::set_volume`], which keep every
/// written level inside [0, 1].
pub trait AudioSink {
    /// Backend name for logs (e.g., "windows-endpoint")
    fn name(&self) -> &str;

    /// Read the current master level, expected in [0, 1]
    fn read_scalar(&self) -> Result<f32, AudioError>;

    /// Write a master level already clamped to [0, 1]
    fn write_scalar(&mut self, level: f32) -> Result<(), AudioError>;

    /// Current master volume in [0, 1]
    fn volume(&self) -> Result<f32, AudioError> {
        self.read_scalar().map(|v| v.clamp(0.0, 1.0))
    }

    /// Apply a master volume, clamping into [0, 1] first
    fn set_volume(&mut self, level: f32) -> Result<(), AudioError> {
        if !level.is_finite() {
            return Err(AudioError::InvalidLevel(level));
        }
        self.write_scalar(level.clamp(0.0, 1.0))
    }
}

/// Why audio control is unavailable
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOnlyReason {
    /// `--no-audio` was given
    Requested,
    /// The backend could not be constructed
    Unavailable(AudioError),
}

impl std::fmt::Display for DisplayOnlyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayOnlyReason::Requested => write!(f, "disabled by --no-audio"),
            DisplayOnlyReason::Unavailable(e) => write!(f, "{}", e),
        }
    }
}

/// Outcome of audio negotiation, fixed for the lifetime of the process
pub enum AudioMode {
    Live(Box<dyn AudioSink>),
    DisplayOnly(DisplayOnlyReason),
}

impl AudioMode {
    pub fn is_live(&self) -> bool {
        matches!(self, AudioMode::Live(_))
    }

    /// Short label for the on-screen status line
    pub fn label(&self) -> String {
        match self {
            AudioMode::Live(sink) => format!("audio: {}", sink.name()),
            AudioMode::DisplayOnly(reason) => format!("display-only ({})", reason),
        }
    }
}

impl std::fmt::Debug for AudioMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioMode::Live(sink) => f.debug_tuple("Live").field(&sink.name()).finish(),
            AudioMode::DisplayOnly(reason) => f.debug_tuple("DisplayOnly").field(reason).finish(),
        }
    }
}

/// Construct the platform master-volume backend
#[cfg(windows)]
pub fn open_default_sink() -> Result<Box<dyn AudioSink>, AudioError> {
    endpoint::EndpointVolumeSink::open().map(|sink| Box::new(sink) as Box<dyn AudioSink>)
}

/// Construct the platform master-volume backend
#[cfg(not(windows))]
pub fn open_default_sink() -> Result<Box<dyn AudioSink>, AudioError> {
    Err(AudioError::Unsupported {
        platform: std::env::consts::OS,
    })
}

/// Decide the audio mode once, at startup
///
/// Never fails: a missing backend downgrades to display-only with a single
/// diagnostic.
pub fn negotiate(no_audio: bool) -> AudioMode {
    negotiate_with(no_audio, open_default_sink)
}

/// [`negotiate`] with an injectable backend constructor
pub fn negotiate_with<F>(no_audio: bool, open: F) -> AudioMode
where
    F: FnOnce() -> Result<Box<dyn AudioSink>, AudioError>,
{
    if no_audio {
        info!("Audio control disabled (--no-audio), running display-only");
        return AudioMode::DisplayOnly(DisplayOnlyReason::Requested);
    }

    match open() {
        Ok(sink) => {
            match sink.volume() {
                Ok(v) => info!(
                    "✅ Audio backend '{}' ready (master volume {}%)",
                    sink.name(),
                    crate::volume::percent(v)
                ),
                Err(e) => warn!("Audio backend '{}' ready but volume unreadable: {}", sink.name(), e),
            }
            AudioMode::Live(sink)
        },
        Err(e) => {
            warn!(
                "⚠️  Failed to initialize audio control: {}. Continuing in display-only mode.",
                e
            );
            AudioMode::DisplayOnly(DisplayOnlyReason::Unavailable(e))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeSink {
        level: Rc<RefCell<f32>>,
    }

    impl AudioSink for FakeSink {
        fn name(&self) -> &str {
            "fake"
        }

        fn read_scalar(&self) -> Result<f32, AudioError> {
            Ok(*self.level.borrow())
        }

        fn write_scalar(&mut self, level: f32) -> Result<(), AudioError> {
            *self.level.borrow_mut() = level;
            Ok(())
        }
    }

    #[test]
    fn test_set_volume_clamps() {
        let level = Rc::new(RefCell::new(0.5));
        let mut sink = FakeSink {
            level: Rc::clone(&level),
        };

        sink.set_volume(1.7).unwrap();
        assert_eq!(*level.borrow(), 1.0);
        sink.set_volume(-0.3).unwrap();
        assert_eq!(*level.borrow(), 0.0);
        sink.set_volume(0.25).unwrap();
        assert_eq!(sink.volume().unwrap(), 0.25);
    }

    #[test]
    fn test_set_volume_rejects_nan() {
        let level = Rc::new(RefCell::new(0.5));
        let mut sink = FakeSink {
            level: Rc::clone(&level),
        };
        assert!(matches!(sink.set_volume(f32::NAN), Err(AudioError::InvalidLevel(_))));
        assert!(matches!(sink.set_volume(f32::INFINITY), Err(AudioError::InvalidLevel(_))));
        assert_eq!(*level.borrow(), 0.5);
    }

    #[test]
    fn test_negotiate_no_audio_never_opens_backend() {
        let mode = negotiate_with(true, || panic!("backend must not be constructed"));
        assert!(matches!(mode, AudioMode::DisplayOnly(DisplayOnlyReason::Requested)));
        assert!(!mode.is_live());
    }

    #[test]
    fn test_negotiate_failure_degrades() {
        let mode = negotiate_with(false, || {
            Err(AudioError::DeviceNotFound("no speakers".to_string()))
        });
        match mode {
            AudioMode::DisplayOnly(DisplayOnlyReason::Unavailable(e)) => {
                assert_eq!(e, AudioError::DeviceNotFound("no speakers".to_string()));
            },
            other => panic!("unexpected mode: {:?}", other),
        }
    }

    #[test]
    fn test_negotiate_success_is_live() {
        let mode = negotiate_with(false, || {
            Ok(Box::new(FakeSink {
                level: Rc::new(RefCell::new(0.4)),
            }) as Box<dyn AudioSink>)
        });
        assert!(mode.is_live());
        assert_eq!(mode.label(), "audio: fake");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_default_sink_unsupported_off_windows() {
        assert!(matches!(
            open_default_sink(),
            Err(AudioError::Unsupported { .. })
        ));
    }
}
