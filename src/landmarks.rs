// src/landmarks.rs - hand landmark frame and geometry helpers
use nalgebra::Point2;
use thiserror::Error;

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    BadLandmarkCount(usize),
}

/// One camera frame's worth of hand landmarks, normalized to [0,1]
/// with the origin at the top-left of the image.
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    points: Vec<Point2<f32>>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Point2<f32>>) -> Result<Self, FrameError> {
        if points.len() != LANDMARK_COUNT {
            return Err(FrameError::BadLandmarkCount(points.len()));
        }
        Ok(Self { points })
    }

    pub fn point(&self, idx: usize) -> Point2<f32> {
        self.points[idx]
    }

    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    /// Mean x of all 21 landmarks, used as the hand centroid for swipes.
    pub fn centroid_x(&self) -> f32 {
        self.points.iter().map(|p| p.x).sum::<f32>() / self.points.len() as f32
    }
}

/// Euclidean distance between two landmarks in normalized units.
pub fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (a - b).norm()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_frames() {
        let err = LandmarkFrame::new(vec![Point2::new(0.5, 0.5); 7]).unwrap_err();
        assert!(matches!(err, FrameError::BadLandmarkCount(7)));
    }

    #[test]
    fn accepts_full_frames() {
        assert!(LandmarkFrame::new(testframes::neutral_points()).is_ok());
    }

    #[test]
    fn centroid_is_mean_x() {
        let mut pts = testframes::neutral_points();
        pts[0] = Point2::new(0.0, 0.5);
        pts[1] = Point2::new(1.0, 0.5);
        let frame = LandmarkFrame::new(pts).unwrap();
        // 19 points at 0.5 plus 0.0 and 1.0
        let expected = (19.0 * 0.5 + 1.0) / 21.0;
        assert!((frame.centroid_x() - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(Point2::new(0.0, 0.0), Point2::new(0.3, 0.4));
        assert!((d - 0.5).abs() < 1e-6);
    }
}
