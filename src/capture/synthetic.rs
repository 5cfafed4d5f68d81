//! Generated frames for simulation builds and tests

use super::{CaptureError, Frame, FrameSource};
use image::Rgb;

/// Default synthetic frame size (VGA)
pub const SYNTHETIC_WIDTH: u32 = 640;
pub const SYNTHETIC_HEIGHT: u32 = 480;

/// Produces a dark vertical-gradient backdrop
///
/// Runs forever unless built with [`SyntheticSource::with_limit`], after
/// which it reports end of stream.
pub struct SyntheticSource {
    template: Frame,
    produced: u64,
    limit: Option<u64>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        let template = Frame::from_fn(width, height, |_, y| {
            let shade = 24 + (y * 40 / height.max(1)) as u8;
            Rgb([shade, shade, shade + 8])
        });
        Self {
            template,
            produced: 0,
            limit: None,
        }
    }

    /// Stop after `frames` frames
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    pub fn produced(&self) -> u64 {
        self.produced
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(SYNTHETIC_WIDTH, SYNTHETIC_HEIGHT)
    }
}

impl FrameSource for SyntheticSource {
    fn name(&self) -> String {
        format!(
            "synthetic {}x{}",
            self.template.width(),
            self.template.height()
        )
    }

    fn read(&mut self) -> Result<Option<Frame>, CaptureError> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return Ok(None);
        }
        self.produced += 1;
        Ok(Some(self.template.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_have_requested_size() {
        let mut source = SyntheticSource::new(32, 16);
        let frame = source.read().unwrap().unwrap();
        assert_eq!(frame.dimensions(), (32, 16));
        assert_eq!(source.name(), "synthetic 32x16");
    }

    #[test]
    fn test_limit_ends_stream() {
        let mut source = SyntheticSource::new(4, 4).with_limit(2);
        assert!(source.read().unwrap().is_some());
        assert!(source.read().unwrap().is_some());
        assert!(source.read().unwrap().is_none());
        assert_eq!(source.produced(), 2);
    }
}
