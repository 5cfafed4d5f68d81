//! Webcam capture through nokhwa

use super::{CaptureError, Frame, FrameSource};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};
use tracing::{debug, info, warn};

/// An open webcam stream
///
/// The stream is stopped when the source is dropped, on every exit path.
pub struct CameraSource {
    camera: Camera,
    index: u32,
}

impl CameraSource {
    pub fn new(index: u32) -> Result<Self, CaptureError> {
        let open_err = |e: nokhwa::NokhwaError| CaptureError::Open {
            index,
            message: e.to_string(),
        };

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(open_err)?;
        camera.open_stream().map_err(open_err)?;

        info!(
            "📷 Opened camera {}: {} ({})",
            index,
            camera.info().human_name(),
            camera.camera_format()
        );

        Ok(Self { camera, index })
    }
}

impl FrameSource for CameraSource {
    fn name(&self) -> String {
        self.camera.info().human_name()
    }

    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Read(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        Frame::from_raw(width, height, decoded.into_raw())
            .map(Some)
            .ok_or_else(|| CaptureError::Read(format!("short frame buffer for {}x{}", width, height)))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        match self.camera.stop_stream() {
            Ok(()) => debug!("Camera {} released", self.index),
            Err(e) => warn!("Failed to stop camera {} cleanly: {}", self.index, e),
        }
    }
}
