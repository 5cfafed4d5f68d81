//! Hand skeleton types shared by detectors, the gesture extractor and the overlay
//!
//! Landmark ids follow the 21-point hand convention used by common hand
//! trackers: 0 is the wrist, then four joints per digit from thumb to pinky.

/// Landmark id within the 21-point hand skeleton
pub type LandmarkId = u8;

pub const WRIST: LandmarkId = 0;
pub const THUMB_CMC: LandmarkId = 1;
pub const THUMB_MCP: LandmarkId = 2;
pub const THUMB_IP: LandmarkId = 3;
pub const THUMB_TIP: LandmarkId = 4;
pub const INDEX_MCP: LandmarkId = 5;
pub const INDEX_PIP: LandmarkId = 6;
pub const INDEX_DIP: LandmarkId = 7;
pub const INDEX_TIP: LandmarkId = 8;
pub const MIDDLE_MCP: LandmarkId = 9;
pub const MIDDLE_PIP: LandmarkId = 10;
pub const MIDDLE_DIP: LandmarkId = 11;
pub const MIDDLE_TIP: LandmarkId = 12;
pub const RING_MCP: LandmarkId = 13;
pub const RING_PIP: LandmarkId = 14;
pub const RING_DIP: LandmarkId = 15;
pub const RING_TIP: LandmarkId = 16;
pub const PINKY_MCP: LandmarkId = 17;
pub const PINKY_PIP: LandmarkId = 18;
pub const PINKY_DIP: LandmarkId = 19;
pub const PINKY_TIP: LandmarkId = 20;

/// Number of keypoints in a complete hand
pub const LANDMARK_COUNT: usize = 21;

/// Bone connections for overlay rendering
pub const HAND_CONNECTIONS: [(LandmarkId, LandmarkId); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// A position in frame pixels (column, row); row grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Integer midpoint, truncated toward zero
    pub fn midpoint(self, other: PixelPoint) -> PixelPoint {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        PixelPoint::new(mid(self.x, other.x), mid(self.y, other.y))
    }
}

/// One detected landmark in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keypoint {
    pub id: LandmarkId,
    pub position: PixelPoint,
}

impl Keypoint {
    pub const fn new(id: LandmarkId, x: i32, y: i32) -> Self {
        Self {
            id,
            position: PixelPoint::new(x, y),
        }
    }
}

/// Keypoints of a single detected hand for one frame
///
/// Keypoints are kept in detector order. A partially visible hand may carry
/// fewer than [`LANDMARK_COUNT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandFrame {
    keypoints: Vec<Keypoint>,
}

impl HandFrame {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Position of a landmark; the last entry wins if an id repeats
    pub fn get(&self, id: LandmarkId) -> Option<PixelPoint> {
        self.keypoints
            .iter()
            .rev()
            .find(|kp| kp.id == id)
            .map(|kp| kp.position)
    }
}

impl From<Vec<Keypoint>> for HandFrame {
    fn from(keypoints: Vec<Keypoint>) -> Self {
        Self::new(keypoints)
    }
}
