//! Video frame acquisition
//!
//! The presentation loop pulls frames through [`FrameSource`]. With the
//! `camera` feature a webcam is read through nokhwa; otherwise a synthetic
//! source stands in so the whole loop runs without hardware.

#[cfg(feature = "camera")]
pub mod camera;
pub mod synthetic;

use image::RgbImage;
use thiserror::Error;

#[cfg(feature = "camera")]
pub use camera::CameraSource;
pub use synthetic::SyntheticSource;

/// An RGB8 video frame
pub type Frame = RgbImage;

/// Capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open capture device {index}: {message}")]
    Open { index: u32, message: String },

    #[error("failed to grab frame: {0}")]
    Read(String),
}

/// Blocking frame producer
pub trait FrameSource {
    /// Human-readable device name
    fn name(&self) -> String;

    /// Block until the next frame is available
    ///
    /// `Ok(None)` signals a clean end of stream.
    fn read(&mut self) -> Result<Option<Frame>, CaptureError>;
}

/// Mirror a frame left-to-right in place (selfie view)
pub fn mirror(frame: &mut Frame) {
    image::imageops::flip_horizontal_in_place(frame);
}

/// Open the frame source for this build
///
/// Builds with the `camera` feature open device `camera_index`; simulation
/// builds ignore the index and generate frames.
#[cfg(feature = "camera")]
pub fn open_source(camera_index: u32) -> Result<Box<dyn FrameSource>, CaptureError> {
    Ok(Box::new(CameraSource::new(camera_index)?))
}

/// Open the frame source for this build
///
/// Builds with the `camera` feature open device `camera_index`; simulation
/// builds ignore the index and generate frames.
#[cfg(not(feature = "camera"))]
pub fn open_source(camera_index: u32) -> Result<Box<dyn FrameSource>, CaptureError> {
    tracing::warn!(
        "Built without the `camera` feature; ignoring --camera {} and using synthetic frames",
        camera_index
    );
    Ok(Box::new(SyntheticSource::default()))
}
