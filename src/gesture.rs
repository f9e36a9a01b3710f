//! Single-frame gesture classification.
//!
//! Pure functions over one `LandmarkFrame`; all temporal logic lives in
//! the controllers. The thumb test compares tip x against the IP joint x,
//! which assumes a roughly upright hand facing the camera - a known
//! limitation of the landmark convention, not generalized here.

use crate::landmarks::{index, LandmarkFrame};

/// Recognized hand poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// All four non-thumb fingers retracted.
    Fist,
    /// Only the index finger extended.
    Point,
    /// Index and middle extended, ring and pinky retracted.
    Peace,
    /// All four non-thumb fingers extended.
    Open,
    /// Anything else, including no hand in frame.
    None,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fist => "FIST",
            Self::Point => "POINT",
            Self::Peace => "PEACE",
            Self::Open => "OPEN",
            Self::None => "NONE",
        }
    }
}

/// Per-finger "extended" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

/// Extension test per finger: thumb by horizontal tip-vs-IP comparison,
/// the rest by fingertip above (smaller y than) the PIP joint.
pub fn finger_states(frame: &LandmarkFrame) -> FingerStates {
    FingerStates {
        thumb: frame.point(index::THUMB_TIP).x < frame.point(index::THUMB_IP).x,
        index: frame.point(index::INDEX_TIP).y < frame.point(index::INDEX_PIP).y,
        middle: frame.point(index::MIDDLE_TIP).y < frame.point(index::MIDDLE_PIP).y,
        ring: frame.point(index::RING_TIP).y < frame.point(index::RING_PIP).y,
        pinky: frame.point(index::PINKY_TIP).y < frame.point(index::PINKY_PIP).y,
    }
}

/// Classify one frame. First matching rule wins; the thumb state is
/// intentionally absent from every rule (FIST and OPEN look only at the
/// four non-thumb fingers), which downstream activation relies on.
pub fn classify(frame: &LandmarkFrame) -> Gesture {
    let f = finger_states(frame);

    if !f.index && !f.middle && !f.ring && !f.pinky {
        return Gesture::Fist;
    }
    if f.index && !f.middle && !f.ring && !f.pinky {
        return Gesture::Point;
    }
    if f.index && f.middle && !f.ring && !f.pinky {
        return Gesture::Peace;
    }
    if f.index && f.middle && f.ring && f.pinky {
        return Gesture::Open;
    }
    Gesture::None
}
