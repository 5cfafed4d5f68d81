//! Pointer-driven hand for simulation builds
//!
//! Synthesizes a right hand with the index finger raised at a fixed spot and
//! the middle fingertip following the pointer, so moving the pointer sideways
//! spreads or closes the two-finger gesture. Holding the primary button curls
//! the middle finger. No pointer over the video means no hand.

use super::{LandmarkSource, NormalizedHand, NormalizedLandmark, PointerSample};
use crate::capture::Frame;
use crate::gesture::landmarks::*;
use anyhow::Result;

/// Fixed index fingertip, normalized
const INDEX_TIP_POS: (f32, f32) = (0.40, 0.28);

/// Knuckle (MCP) positions, normalized
const INDEX_MCP_POS: (f32, f32) = (0.40, 0.62);
const MIDDLE_MCP_POS: (f32, f32) = (0.47, 0.60);
const RING_MCP_POS: (f32, f32) = (0.53, 0.62);
const PINKY_MCP_POS: (f32, f32) = (0.58, 0.66);

#[derive(Debug, Default)]
pub struct SimulatedHand {
    pointer: Option<PointerSample>,
}

impl SimulatedHand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the synthetic hand for a pointer over a `width` × `height` frame
    pub fn hand_at(pointer: PointerSample, width: u32, height: u32) -> NormalizedHand {
        let px = (pointer.x / width.max(1) as f32).clamp(0.0, 1.0);
        let py = (pointer.y / height.max(1) as f32).clamp(0.0, 1.0);

        let mut landmarks = Vec::with_capacity(LANDMARK_COUNT);
        let mut push = |id: LandmarkId, (x, y): (f32, f32)| {
            landmarks.push(NormalizedLandmark { id, x, y });
        };

        push(WRIST, (0.46, 0.88));
        push(THUMB_CMC, (0.38, 0.80));
        push(THUMB_MCP, (0.33, 0.73));
        push(THUMB_IP, (0.30, 0.67));
        push(THUMB_TIP, (0.28, 0.61));

        let (index_pip, index_dip) = joints_between(INDEX_MCP_POS, INDEX_TIP_POS);
        push(INDEX_MCP, INDEX_MCP_POS);
        push(INDEX_PIP, index_pip);
        push(INDEX_DIP, index_dip);
        push(INDEX_TIP, INDEX_TIP_POS);

        push(MIDDLE_MCP, MIDDLE_MCP_POS);
        if pointer.pressed {
            let (pip, dip, tip) = curled(MIDDLE_MCP_POS);
            push(MIDDLE_PIP, pip);
            push(MIDDLE_DIP, dip);
            push(MIDDLE_TIP, tip);
        } else {
            let (pip, dip) = joints_between(MIDDLE_MCP_POS, (px, py));
            push(MIDDLE_PIP, pip);
            push(MIDDLE_DIP, dip);
            push(MIDDLE_TIP, (px, py));
        }

        for (mcp_id, mcp) in [(RING_MCP, RING_MCP_POS), (PINKY_MCP, PINKY_MCP_POS)] {
            let (pip, dip, tip) = curled(mcp);
            push(mcp_id, mcp);
            push(mcp_id + 1, pip);
            push(mcp_id + 2, dip);
            push(mcp_id + 3, tip);
        }

        NormalizedHand { landmarks }
    }
}

/// PIP and DIP placed along a straight finger from knuckle to tip
fn joints_between(mcp: (f32, f32), tip: (f32, f32)) -> ((f32, f32), (f32, f32)) {
    let lerp = |t: f32| (mcp.0 + (tip.0 - mcp.0) * t, mcp.1 + (tip.1 - mcp.1) * t);
    (lerp(0.45), lerp(0.75))
}

/// PIP, DIP and tip of a finger folded toward the palm (tip below PIP)
fn curled(mcp: (f32, f32)) -> ((f32, f32), (f32, f32), (f32, f32)) {
    (
        (mcp.0 + 0.01, mcp.1 - 0.07),
        (mcp.0 + 0.015, mcp.1 - 0.04),
        (mcp.0 + 0.015, mcp.1 + 0.01),
    )
}

impl LandmarkSource for SimulatedHand {
    fn name(&self) -> &str {
        "simulated (pointer)"
    }

    fn detect(&mut self, frame: &Frame) -> Result<Option<NormalizedHand>> {
        Ok(self
            .pointer
            .map(|p| Self::hand_at(p, frame.width(), frame.height())))
    }

    fn observe_pointer(&mut self, pointer: Option<PointerSample>) {
        self.pointer = pointer;
    }
}
