//! ONNX hand-landmark model (MediaPipe-style, 224×224 NHWC input)
//!
//! Runs the landmark network on the whole frame. Output 0 holds 21 × (x, y, z)
//! in input-pixel units, output 1 the hand presence score.

use super::{LandmarkSource, NormalizedHand, NormalizedLandmark};
use crate::capture::Frame;
use crate::gesture::landmarks::LANDMARK_COUNT;
use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{debug, info};

const INPUT_SIZE: u32 = 224;

pub struct OnnxHandLandmarker {
    session: Session,
    min_confidence: f32,
}

impl OnnxHandLandmarker {
    pub fn new(model_path: &str, min_confidence: f32) -> Result<Self> {
        if !Path::new(model_path).exists() {
            bail!("model file not found");
        }

        info!("Loading hand-landmark model from {}...", model_path);
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model: {}", model_path))?;

        Ok(Self {
            session,
            min_confidence,
        })
    }

    fn preprocess(frame: &Frame) -> Vec<f32> {
        let resized = image::imageops::resize(frame, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
        resized
            .pixels()
            .flat_map(|p| p.0.map(|c| c as f32 / 255.0))
            .collect()
    }
}

impl LandmarkSource for OnnxHandLandmarker {
    fn name(&self) -> &str {
        "onnx hand landmarks"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Option<NormalizedHand>> {
        let input_data = Self::preprocess(frame);
        let shape = vec![1, INPUT_SIZE as i64, INPUT_SIZE as i64, 3];
        let input = ort::value::Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        let (_score_shape, score) = outputs[1].try_extract_tensor::<f32>()?;
        let presence = score.first().copied().unwrap_or(0.0);
        if presence < self.min_confidence {
            debug!("Hand presence {:.2} below threshold", presence);
            return Ok(None);
        }

        let (_shape, coords) = outputs[0].try_extract_tensor::<f32>()?;
        if coords.len() < LANDMARK_COUNT * 3 {
            bail!("landmark tensor too short: {} values", coords.len());
        }

        let scale = INPUT_SIZE as f32;
        let landmarks = coords
            .chunks_exact(3)
            .take(LANDMARK_COUNT)
            .enumerate()
            .map(|(i, xyz)| NormalizedLandmark {
                id: i as u8,
                x: xyz[0] / scale,
                y: xyz[1] / scale,
            })
            .collect();

        Ok(Some(NormalizedHand { landmarks }))
    }
}
