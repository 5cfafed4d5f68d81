//! Fingertip distance → volume mapping and smoothing
//!
//! The mapping is a clamped linear interpolation over the calibration range,
//! followed by a first-order low-pass (exponential moving average) that damps
//! frame-to-frame tracking jitter. The filter state is an explicit value that
//! callers thread through each step; nothing here is global.

use crate::config::{CalibrationBounds, SmoothingFactor, ValidatedConfig};

/// Map a fingertip distance onto [0, 1]
///
/// Distances at or below `bounds.min()` saturate to 0.0, at or above
/// `bounds.max()` to 1.0. A NaN distance maps to 0.0.
pub fn map_distance(dist: f32, bounds: &CalibrationBounds) -> f32 {
    if dist.is_nan() {
        return 0.0;
    }
    ((dist - bounds.min()) / bounds.span()).clamp(0.0, 1.0)
}

/// Whole percent of a volume scalar, truncated and clamped to 0–100
pub fn percent(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 100.0) as u8
}

/// Smoothed master volume carried across frames
///
/// Always in [0, 1]: each update is a convex combination of the previous
/// value and an in-range target.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SmoothedVolume(f32);

impl SmoothedVolume {
    /// Start value at process launch
    pub const ZERO: SmoothedVolume = SmoothedVolume(0.0);

    /// Build from an arbitrary level, clamped into range
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            return Self::ZERO;
        }
        Self(level.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Whole percent, truncated (0–100)
    pub fn percent(self) -> u8 {
        percent(self.0)
    }

    /// One EMA step: `old * (1 - alpha) + target * alpha`
    #[must_use]
    pub fn advance(self, target: f32, alpha: SmoothingFactor) -> Self {
        let a = alpha.get();
        let target = if target.is_nan() { self.0 } else { target.clamp(0.0, 1.0) };
        // Rounding can nudge a convex combination a hair past the bounds.
        Self((self.0 * (1.0 - a) + target * a).clamp(0.0, 1.0))
    }
}

/// Calibrated, smoothed gesture → volume mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeMapper {
    bounds: CalibrationBounds,
    alpha: SmoothingFactor,
}

impl VolumeMapper {
    pub fn new(bounds: CalibrationBounds, alpha: SmoothingFactor) -> Self {
        Self { bounds, alpha }
    }

    pub fn from_config(config: &ValidatedConfig) -> Self {
        Self::new(config.bounds, config.alpha)
    }

    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    pub fn alpha(&self) -> SmoothingFactor {
        self.alpha
    }

    /// Unsmoothed target volume for a distance
    pub fn target(&self, dist: f32) -> f32 {
        map_distance(dist, &self.bounds)
    }

    /// Advance the filter for one frame
    ///
    /// `dist` is `None` when the gesture was not shown this frame; the state
    /// is then returned unchanged so a brief tracking loss never moves the
    /// volume. NaN distances are treated the same way.
    #[must_use]
    pub fn step(&self, state: SmoothedVolume, dist: Option<f32>) -> SmoothedVolume {
        match dist.filter(|d| !d.is_nan()) {
            Some(d) => state.advance(self.target(d), self.alpha),
            None => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds() -> CalibrationBounds {
        CalibrationBounds::new(20.0, 200.0).unwrap()
    }

    fn mapper() -> VolumeMapper {
        VolumeMapper::new(bounds(), SmoothingFactor::new(0.2).unwrap())
    }

    #[test]
    fn test_percent_truncates_and_clamps() {
        assert_eq!(percent(0.999), 99);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(-0.2), 0);
        assert_eq!(percent(f32::NAN), 0);
        assert_eq!(SmoothedVolume::new(0.999).percent(), percent(0.999));
    }

    #[test]
    fn test_map_at_min_is_zero() {
        assert_eq!(map_distance(20.0, &bounds()), 0.0);
    }

    #[test]
    fn test_map_midpoint() {
        assert!((map_distance(110.0, &bounds()) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_map_at_max_is_one() {
        assert_eq!(map_distance(200.0, &bounds()), 1.0);
    }

    #[test]
    fn test_map_above_max_clamps() {
        assert_eq!(map_distance(300.0, &bounds()), 1.0);
        assert_eq!(map_distance(f32::INFINITY, &bounds()), 1.0);
    }

    #[test]
    fn test_map_below_min_clamps() {
        assert_eq!(map_distance(0.0, &bounds()), 0.0);
        assert_eq!(map_distance(-50.0, &bounds()), 0.0);
        assert_eq!(map_distance(f32::NAN, &bounds()), 0.0);
    }

    #[test]
    fn test_smoothing_sequence() {
        let alpha = SmoothingFactor::new(0.2).unwrap();
        let v = SmoothedVolume::ZERO.advance(1.0, alpha);
        assert!((v.get() - 0.2).abs() < 1e-6);
        let v = v.advance(1.0, alpha);
        assert!((v.get() - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_step_holds_without_gesture() {
        let m = mapper();
        let after_gesture = m.step(SmoothedVolume::ZERO, Some(200.0));
        let after_loss = m.step(after_gesture, None);
        assert_eq!(after_gesture, after_loss);
        assert_eq!(m.step(after_loss, Some(f32::NAN)), after_loss);
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(SmoothedVolume::new(0.369).percent(), 36);
        assert_eq!(SmoothedVolume::new(1.0).percent(), 100);
        assert_eq!(SmoothedVolume::new(7.0).get(), 1.0);
        assert_eq!(SmoothedVolume::new(f32::NAN), SmoothedVolume::ZERO);
    }

    #[test]
    fn test_converges_toward_target() {
        let m = mapper();
        let mut v = SmoothedVolume::ZERO;
        for _ in 0..60 {
            v = m.step(v, Some(110.0));
        }
        assert!((v.get() - 0.5).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_saturates_below_min(dist in -1.0e6f32..=20.0) {
            prop_assert_eq!(map_distance(dist, &bounds()), 0.0);
        }

        #[test]
        fn prop_saturates_above_max(dist in 200.0f32..1.0e6) {
            prop_assert_eq!(map_distance(dist, &bounds()), 1.0);
        }

        #[test]
        fn prop_strictly_increasing_inside(a in 20.5f32..199.5, delta in 0.01f32..10.0) {
            let b = a + delta;
            prop_assume!(b < 200.0);
            prop_assert!(map_distance(a, &bounds()) < map_distance(b, &bounds()));
        }

        #[test]
        fn prop_smoothed_stays_in_range(
            initial in 0.0f32..=1.0,
            alpha in 0.001f32..0.999,
            targets in prop::collection::vec(0.0f32..=1.0, 0..200),
        ) {
            let alpha = SmoothingFactor::new(alpha).unwrap();
            let mut v = SmoothedVolume::new(initial);
            for t in targets {
                v = v.advance(t, alpha);
                prop_assert!((0.0..=1.0).contains(&v.get()));
            }
        }

        #[test]
        fn prop_step_stays_in_range_for_any_distance(
            dists in prop::collection::vec(prop::option::of(-1000.0f32..1000.0), 0..100),
        ) {
            let m = mapper();
            let mut v = SmoothedVolume::ZERO;
            for d in dists {
                v = m.step(v, d);
                prop_assert!((0.0..=1.0).contains(&v.get()));
            }
        }
    }
}
