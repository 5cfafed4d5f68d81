//! Configuration for the gesture volume controller
//!
//! There is no configuration file. Calibration and smoothing are compile-time
//! constants wrapped in validated types, and the only runtime settings come
//! from the command line (or their environment fallbacks).

use thiserror::Error;

/// Fingertip distance (px) that maps to volume 0.0
pub const MIN_DIST: f32 = 20.0;

/// Fingertip distance (px) that maps to volume 1.0
pub const MAX_DIST: f32 = 200.0;

/// Exponential smoothing factor applied to every gesture frame
pub const ALPHA: f32 = 0.2;

/// Minimum hand presence score accepted from a landmark model
pub const DETECTION_CONFIDENCE: f32 = 0.7;

/// Environment variable holding the hand-landmark model path
pub const MODEL_PATH_ENV: &str = "GESTURE_VOLUME_MODEL";

/// Model file used when `GESTURE_VOLUME_MODEL` is unset
pub const DEFAULT_MODEL_PATH: &str = "hand_landmark.onnx";

/// Startup configuration errors, raised before the capture loop starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("calibration bounds are degenerate: MIN_DIST == MAX_DIST == {0}")]
    DegenerateBounds(f32),

    #[error("calibration bounds are inverted: MIN_DIST {min} > MAX_DIST {max}")]
    InvertedBounds { min: f32, max: f32 },

    #[error("calibration bounds must be finite (min={min}, max={max})")]
    NonFiniteBounds { min: f32, max: f32 },

    #[error("smoothing factor must lie strictly between 0 and 1, got {0}")]
    InvalidAlpha(f32),
}

/// Pixel-distance range mapped linearly onto [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBounds {
    min: f32,
    max: f32,
}

impl CalibrationBounds {
    /// Validate and build a calibration range
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteBounds { min, max });
        }
        if min == max {
            return Err(ConfigError::DegenerateBounds(min));
        }
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Width of the range; always strictly positive
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// EMA weight given to the newest sample, in (0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFactor(f32);

impl SmoothingFactor {
    pub fn new(alpha: f32) -> Result<Self, ConfigError> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(ConfigError::InvalidAlpha(alpha))
        }
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

/// Raw gesture tuning, validated into typed values by [`GestureConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub min_dist: f32,
    pub max_dist: f32,
    pub alpha: f32,
    /// Mirror frames horizontally before detection (selfie view)
    pub mirror: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_dist: MIN_DIST,
            max_dist: MAX_DIST,
            alpha: ALPHA,
            mirror: true,
        }
    }
}

/// Output of a successful [`GestureConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedConfig {
    pub bounds: CalibrationBounds,
    pub alpha: SmoothingFactor,
    pub mirror: bool,
}

impl GestureConfig {
    /// Check every constant once, before any device is opened
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        Ok(ValidatedConfig {
            bounds: CalibrationBounds::new(self.min_dist, self.max_dist)?,
            alpha: SmoothingFactor::new(self.alpha)?,
            mirror: self.mirror,
        })
    }
}

/// Settings resolved from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub camera_index: u32,
    pub no_audio: bool,
    pub model_path: String,
}

impl RuntimeSettings {
    pub fn new(camera_index: u32, no_audio: bool) -> Self {
        let model_path =
            std::env::var(MODEL_PATH_ENV).unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
        Self {
            camera_index,
            no_audio,
            model_path,
        }
    }
}
