//! Per-frame gesture → volume orchestration
//!
//! [`VolumeController`] owns the only state that outlives a frame (the
//! smoothed volume) and the negotiated audio mode. The presentation loop hands
//! it the detected hand for each frame and renders the returned report.

use crate::audio::AudioMode;
use crate::gesture::{GestureState, HandFrame, PixelPoint};
use crate::volume::{SmoothedVolume, VolumeMapper};
use tracing::{debug, warn};

/// What the gesture extractor saw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStatus {
    /// No hand detected
    NoHand,
    /// A hand is visible but not both fingers are raised (or a tip is missing)
    Idle,
    /// Both fingers raised; volume tracked this frame
    Active {
        index_tip: PixelPoint,
        middle_tip: PixelPoint,
        distance: f32,
        target: f32,
    },
}

/// Result of processing one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub status: GestureStatus,
    /// Smoothed volume after this frame
    pub volume: SmoothedVolume,
    /// Whether the volume was written to the audio backend
    pub applied: bool,
}

pub struct VolumeController {
    mapper: VolumeMapper,
    volume: SmoothedVolume,
    audio: AudioMode,
    write_failures: u64,
}

impl VolumeController {
    pub fn new(mapper: VolumeMapper, audio: AudioMode) -> Self {
        Self {
            mapper,
            volume: SmoothedVolume::ZERO,
            audio,
            write_failures: 0,
        }
    }

    pub fn volume(&self) -> SmoothedVolume {
        self.volume
    }

    pub fn audio(&self) -> &AudioMode {
        &self.audio
    }

    /// Audio writes that failed so far
    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    /// Process the (optional) hand detected in one frame
    ///
    /// Without an active gesture the smoothed volume is held and nothing is
    /// written to the audio backend.
    pub fn process(&mut self, hand: Option<&HandFrame>) -> FrameReport {
        let gesture = match hand {
            None => None,
            Some(h) if h.is_empty() => None,
            Some(h) => Some(GestureState::extract(h)),
        };

        let status = match gesture {
            None => GestureStatus::NoHand,
            Some(Some(state)) if state.is_active() => {
                let distance = state.tip_distance();
                GestureStatus::Active {
                    index_tip: state.index_tip,
                    middle_tip: state.middle_tip,
                    distance,
                    target: self.mapper.target(distance),
                }
            },
            Some(_) => GestureStatus::Idle,
        };

        let distance = match status {
            GestureStatus::Active { distance, .. } => Some(distance),
            _ => None,
        };
        self.volume = self.mapper.step(self.volume, distance);

        let applied = distance.is_some() && self.apply();

        FrameReport {
            status,
            volume: self.volume,
            applied,
        }
    }

    fn apply(&mut self) -> bool {
        let AudioMode::Live(sink) = &mut self.audio else {
            return false;
        };

        match sink.set_volume(self.volume.get()) {
            Ok(()) => true,
            Err(e) => {
                self.write_failures += 1;
                if self.write_failures == 1 {
                    warn!("Failed to set master volume: {}", e);
                } else {
                    debug!("Failed to set master volume (#{}): {}", self.write_failures, e);
                }
                false
            },
        }
    }
}
