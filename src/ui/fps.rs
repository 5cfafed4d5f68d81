//! Instantaneous frame-rate counter

use std::time::Instant;

/// Frames per second from the gap between consecutive frames
#[derive(Debug, Default)]
pub struct FpsCounter {
    previous: Option<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now`; 0.0 for the first frame
    pub fn tick(&mut self, now: Instant) -> f32 {
        let fps = match self.previous {
            Some(prev) => {
                let dt = now.saturating_duration_since(prev).as_secs_f32();
                if dt > 0.0 {
                    1.0 / dt
                } else {
                    0.0
                }
            },
            None => 0.0,
        };
        self.previous = Some(now);
        fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_frame_is_zero() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.tick(Instant::now()), 0.0);
    }

    #[test]
    fn test_rate_from_frame_gap() {
        let mut fps = FpsCounter::new();
        let start = Instant::now();
        fps.tick(start);
        let rate = fps.tick(start + Duration::from_millis(40));
        assert!((rate - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_same_instant_is_zero() {
        let mut fps = FpsCounter::new();
        let now = Instant::now();
        fps.tick(now);
        assert_eq!(fps.tick(now), 0.0);
    }
}
