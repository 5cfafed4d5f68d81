//! Gesture extraction from hand keypoints
//!
//! Derives the finger-up flags and fingertip positions that drive the volume
//! gesture. Everything here is a pure function of its inputs; a missing
//! landmark is an ordinary partial-occlusion case and never an error.

pub mod landmarks;

use std::collections::HashMap;

pub use landmarks::{HandFrame, Keypoint, LandmarkId, PixelPoint};
use landmarks::{INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP};

/// Build an id → position lookup from a keypoint list
///
/// If an id occurs more than once the later keypoint wins.
pub fn position_map(keypoints: &[Keypoint]) -> HashMap<LandmarkId, PixelPoint> {
    keypoints.iter().map(|kp| (kp.id, kp.position)).collect()
}

/// Check whether a finger is extended upward
///
/// True iff both landmarks are present and the tip sits strictly higher on
/// screen (smaller row) than the PIP joint. Returns false when either id is
/// absent.
pub fn finger_up(keypoints: &[Keypoint], tip_id: LandmarkId, pip_id: LandmarkId) -> bool {
    let positions = position_map(keypoints);
    match (positions.get(&tip_id), positions.get(&pip_id)) {
        (Some(tip), Some(pip)) => tip.y < pip.y,
        _ => false,
    }
}

/// Euclidean distance between two pixel points
pub fn distance(a: PixelPoint, b: PixelPoint) -> f32 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt() as f32
}

/// Per-frame gesture reading for the index/middle pair
///
/// Only exists when both fingertips were detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureState {
    pub index_up: bool,
    pub middle_up: bool,
    pub index_tip: PixelPoint,
    pub middle_tip: PixelPoint,
}

impl GestureState {
    /// Read the gesture from a hand, or None if a fingertip is missing
    pub fn extract(hand: &HandFrame) -> Option<Self> {
        let keypoints = hand.keypoints();
        let positions = position_map(keypoints);
        let index_tip = *positions.get(&INDEX_TIP)?;
        let middle_tip = *positions.get(&MIDDLE_TIP)?;

        Some(Self {
            index_up: finger_up(keypoints, INDEX_TIP, INDEX_PIP),
            middle_up: finger_up(keypoints, MIDDLE_TIP, MIDDLE_PIP),
            index_tip,
            middle_tip,
        })
    }

    /// Both fingers raised: the volume gesture is being shown
    pub fn is_active(&self) -> bool {
        self.index_up && self.middle_up
    }

    /// Fingertip separation in pixels
    pub fn tip_distance(&self) -> f32 {
        distance(self.index_tip, self.middle_tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Index and middle fingers raised, tips 90px apart horizontally
    fn two_fingers_up() -> Vec<Keypoint> {
        vec![
            Keypoint::new(INDEX_PIP, 100, 200),
            Keypoint::new(INDEX_TIP, 100, 120),
            Keypoint::new(MIDDLE_PIP, 190, 200),
            Keypoint::new(MIDDLE_TIP, 190, 120),
        ]
    }

    #[test]
    fn test_finger_up_when_tip_above_pip() {
        let kps = two_fingers_up();
        assert!(finger_up(&kps, INDEX_TIP, INDEX_PIP));
        assert!(finger_up(&kps, MIDDLE_TIP, MIDDLE_PIP));
    }

    #[test]
    fn test_finger_up_equal_rows_is_down() {
        let kps = vec![Keypoint::new(INDEX_TIP, 0, 50), Keypoint::new(INDEX_PIP, 0, 50)];
        assert!(!finger_up(&kps, INDEX_TIP, INDEX_PIP));
    }

    #[test]
    fn test_finger_up_missing_middle_tip() {
        let kps: Vec<_> = two_fingers_up()
            .into_iter()
            .filter(|kp| kp.id != MIDDLE_TIP)
            .collect();
        assert!(!finger_up(&kps, MIDDLE_TIP, MIDDLE_PIP));
        assert!(finger_up(&kps, INDEX_TIP, INDEX_PIP));
    }

    #[test]
    fn test_finger_up_empty_list() {
        assert!(!finger_up(&[], INDEX_TIP, INDEX_PIP));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(PixelPoint::new(0, 0), PixelPoint::new(3, 4)), 5.0);
        assert_eq!(distance(PixelPoint::new(7, 7), PixelPoint::new(7, 7)), 0.0);
    }

    #[test]
    fn test_distance_at_coordinate_extremes() {
        let d = distance(PixelPoint::new(i32::MAX, 0), PixelPoint::new(-1, 0));
        assert_eq!(d, 2_147_483_648.0);
        let d = distance(PixelPoint::new(i32::MIN, i32::MIN), PixelPoint::new(i32::MAX, i32::MAX));
        assert!(d.is_finite() && d > 0.0);
    }

    #[test]
    fn test_far_out_of_frame_landmarks_do_not_overflow() {
        use crate::detector::{to_hand_frame, NormalizedHand, NormalizedLandmark};

        let hand = NormalizedHand {
            landmarks: vec![
                NormalizedLandmark { id: INDEX_PIP, x: -1e7, y: 0.6 },
                NormalizedLandmark { id: INDEX_TIP, x: -1e7, y: 0.3 },
                NormalizedLandmark { id: MIDDLE_PIP, x: 1e7, y: 0.6 },
                NormalizedLandmark { id: MIDDLE_TIP, x: 1e7, y: 0.3 },
            ],
        };
        let state = GestureState::extract(&to_hand_frame(&hand, 640, 480)).unwrap();
        assert!(state.is_active());
        assert!(state.tip_distance() > 200.0);
        assert_eq!(state.index_tip.midpoint(state.middle_tip).y, state.index_tip.y);
    }

    #[test]
    fn test_position_map_later_entry_wins() {
        let kps = vec![Keypoint::new(INDEX_TIP, 1, 1), Keypoint::new(INDEX_TIP, 9, 9)];
        let map = position_map(&kps);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&INDEX_TIP], PixelPoint::new(9, 9));
    }

    #[test]
    fn test_extract_active_gesture() {
        let state = GestureState::extract(&HandFrame::new(two_fingers_up())).unwrap();
        assert!(state.is_active());
        assert_eq!(state.tip_distance(), 90.0);
    }

    #[test]
    fn test_extract_needs_both_tips() {
        let hand = HandFrame::new(vec![Keypoint::new(INDEX_TIP, 0, 0)]);
        assert_eq!(GestureState::extract(&hand), None);
        assert_eq!(GestureState::extract(&HandFrame::default()), None);
    }

    #[test]
    fn test_extract_missing_pip_means_finger_down() {
        let hand = HandFrame::new(vec![
            Keypoint::new(INDEX_TIP, 100, 120),
            Keypoint::new(MIDDLE_PIP, 190, 200),
            Keypoint::new(MIDDLE_TIP, 190, 120),
        ]);
        let state = GestureState::extract(&hand).unwrap();
        assert!(!state.index_up);
        assert!(state.middle_up);
        assert!(!state.is_active());
    }

    proptest! {
        #[test]
        fn prop_finger_up_false_without_both_ids(
            points in prop::collection::vec((0u8..21, -500i32..500, -500i32..500), 0..30),
        ) {
            let kps: Vec<_> = points
                .into_iter()
                .filter(|(id, _, _)| *id != MIDDLE_TIP)
                .map(|(id, x, y)| Keypoint::new(id, x, y))
                .collect();
            prop_assert!(!finger_up(&kps, MIDDLE_TIP, MIDDLE_PIP));
            prop_assert!(!finger_up(&kps, MIDDLE_PIP, MIDDLE_TIP));
        }

        #[test]
        fn prop_distance_total_over_i32(
            ax in any::<i32>(), ay in any::<i32>(), bx in any::<i32>(), by in any::<i32>(),
        ) {
            let (a, b) = (PixelPoint::new(ax, ay), PixelPoint::new(bx, by));
            let d = distance(a, b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
            prop_assert_eq!(d, distance(b, a));
        }

        #[test]
        fn prop_finger_up_iff_strictly_above(tip_y in -1000i32..1000, pip_y in -1000i32..1000) {
            let kps = vec![Keypoint::new(INDEX_TIP, 5, tip_y), Keypoint::new(INDEX_PIP, 5, pip_y)];
            prop_assert_eq!(finger_up(&kps, INDEX_TIP, INDEX_PIP), tip_y < pip_y);
        }
    }
}
