//! Hand-landmark detection
//!
//! A [`LandmarkSource`] turns a frame into at most one hand, as 21 keypoints in
//! normalized image coordinates. [`to_hand_frame`] converts those to pixels
//! for the gesture extractor. Any temporal smoothing a detector does is its
//! own business.

#[cfg(feature = "onnx")]
pub mod onnx;
pub mod simulated;

use crate::capture::Frame;
use crate::gesture::{HandFrame, Keypoint, LandmarkId};
use anyhow::Result;

pub use simulated::SimulatedHand;

/// A landmark in normalized image coordinates ([0, 1] inside the frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedLandmark {
    pub id: LandmarkId,
    pub x: f32,
    pub y: f32,
}

/// One detected hand, landmarks in normalized coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedHand {
    pub landmarks: Vec<NormalizedLandmark>,
}

/// Convert a normalized hand to pixel keypoints for a `width` × `height` frame
///
/// Coordinates are scaled by the frame size and truncated toward zero.
pub fn to_hand_frame(hand: &NormalizedHand, width: u32, height: u32) -> HandFrame {
    let (w, h) = (width as f32, height as f32);
    hand.landmarks
        .iter()
        .map(|lm| Keypoint::new(lm.id, (lm.x * w) as i32, (lm.y * h) as i32))
        .collect::<Vec<_>>()
        .into()
}

/// Pointer state over the video area, in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

/// Per-frame hand detector (single-hand configuration)
pub trait LandmarkSource {
    fn name(&self) -> &str;

    /// Detect zero or one hand in the frame
    fn detect(&mut self, frame: &Frame) -> Result<Option<NormalizedHand>>;

    /// Latest pointer position over the video, if any
    ///
    /// Default implementation: ignored (camera-driven detectors don't need it)
    fn observe_pointer(&mut self, _pointer: Option<PointerSample>) {}
}

/// Pick the landmark source for this build
///
/// With the `onnx` feature the model at `model_path` is loaded; if that fails
/// the pointer-driven simulation is used instead.
#[cfg(feature = "onnx")]
pub fn open_detector(model_path: &str, min_confidence: f32) -> Box<dyn LandmarkSource> {
    match onnx::OnnxHandLandmarker::new(model_path, min_confidence) {
        Ok(detector) => Box::new(detector),
        Err(e) => {
            tracing::warn!(
                "⚠️  Failed to load hand-landmark model '{}': {:#}. Falling back to simulated hand.",
                model_path,
                e
            );
            Box::new(SimulatedHand::new())
        },
    }
}

/// Pick the landmark source for this build
///
/// With the `onnx` feature the model at `model_path` is loaded; if that fails
/// the pointer-driven simulation is used instead.
#[cfg(not(feature = "onnx"))]
pub fn open_detector(model_path: &str, _min_confidence: f32) -> Box<dyn LandmarkSource> {
    tracing::info!(
        "Built without the `onnx` feature; ignoring model '{}' and using the simulated hand",
        model_path
    );
    Box::new(SimulatedHand::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PixelPoint;

    #[test]
    fn test_to_hand_frame_scales_and_truncates() {
        let hand = NormalizedHand {
            landmarks: vec![
                NormalizedLandmark { id: 8, x: 0.5, y: 0.25 },
                NormalizedLandmark { id: 12, x: 0.999, y: 0.001 },
            ],
        };
        let frame = to_hand_frame(&hand, 640, 480);
        assert_eq!(frame.get(8), Some(PixelPoint::new(320, 120)));
        assert_eq!(frame.get(12), Some(PixelPoint::new(639, 0)));
    }

    #[test]
    fn test_to_hand_frame_empty() {
        assert!(to_hand_frame(&NormalizedHand::default(), 640, 480).is_empty());
    }
}
