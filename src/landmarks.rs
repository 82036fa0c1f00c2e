//! Hand landmark scheme and per-frame snapshot types.
//!
//! Models the 21-point anatomical hand model emitted by the landmark
//! detector. The core consumes exactly two indices per frame (index
//! fingertip and thumb tip), already mapped into the render surface's
//! pixel coordinate space by the external detection pipeline.

use tracing::debug;

use crate::geometry::Point;

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand landmarks of the detector's anatomical scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }
}

// ── Hand frame ─────────────────────────────────────────────

/// One frame's worth of landmark data for a single detected hand.
///
/// Consumed and discarded each iteration; never retained by the core.
#[derive(Debug, Clone)]
pub struct HandFrame {
    /// Landmark positions indexed by [`HandLandmark`].
    pub points: Vec<Point>,
    /// Detector confidence for this frame (0.0-1.0).
    pub confidence: f32,
}

impl HandFrame {
    /// Create a frame from detector output.
    pub fn new(points: Vec<Point>, confidence: f32) -> Self {
        Self { points, confidence }
    }

    /// Position of a single landmark, or `None` if the frame is short.
    pub fn landmark(&self, landmark: HandLandmark) -> Option<Point> {
        self.points.get(landmark.index()).copied()
    }

    /// The (index fingertip, thumb tip) pair used for pinch detection.
    ///
    /// Returns `None` unless the frame carries exactly 21 landmarks;
    /// a malformed frame classifies as "no hand", not as an error.
    pub fn fingertips(&self) -> Option<(Point, Point)> {
        if self.points.len() != LANDMARK_COUNT {
            debug!(
                "hand frame: expected {} landmarks, got {}",
                LANDMARK_COUNT,
                self.points.len(),
            );
            return None;
        }
        Some((
            self.points[HandLandmark::IndexTip.index()],
            self.points[HandLandmark::ThumbTip.index()],
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::ThumbTip.index(), 4);
        assert_eq!(HandLandmark::IndexTip.index(), 8);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
        assert_eq!(LANDMARK_COUNT, 21);
    }

    #[test]
    fn test_landmark_as_str() {
        assert_eq!(HandLandmark::Wrist.as_str(), "wrist");
        assert_eq!(HandLandmark::ThumbTip.as_str(), "thumb-tip");
        assert_eq!(HandLandmark::IndexTip.as_str(), "index-tip");
        assert_eq!(HandLandmark::PinkyTip.as_str(), "pinky-tip");
    }

    #[test]
    fn test_fingertips() {
        let mut points = vec![Point::default(); LANDMARK_COUNT];
        points[HandLandmark::IndexTip.index()] = Point::new(120.0, 80.0);
        points[HandLandmark::ThumbTip.index()] = Point::new(100.0, 90.0);
        let frame = HandFrame::new(points, 0.9);

        let (index_tip, thumb_tip) = frame.fingertips().expect("complete frame");
        assert_eq!(index_tip, Point::new(120.0, 80.0));
        assert_eq!(thumb_tip, Point::new(100.0, 90.0));
    }

    #[test]
    fn test_fingertips_wrong_count() {
        let frame = HandFrame::new(vec![Point::default(); 10], 0.9);
        assert!(frame.fingertips().is_none());

        let frame = HandFrame::new(Vec::new(), 0.9);
        assert!(frame.fingertips().is_none());
    }

    #[test]
    fn test_landmark_accessor() {
        let mut points = vec![Point::default(); LANDMARK_COUNT];
        points[HandLandmark::Wrist.index()] = Point::new(5.0, 6.0);
        let frame = HandFrame::new(points, 0.8);

        assert_eq!(frame.landmark(HandLandmark::Wrist), Some(Point::new(5.0, 6.0)));

        let short = HandFrame::new(vec![Point::default(); 3], 0.8);
        assert!(short.landmark(HandLandmark::ThumbTip).is_none());
    }
}
