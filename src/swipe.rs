//! Horizontal swipe detection while the gesture is OPEN.
//!
//! Keeps a short timestamped history of the hand centroid x and fires
//! when the last eight samples show a large net displacement inside a
//! bounded time span. A cooldown keeps page-navigation from repeating.

use std::collections::VecDeque;

use tracing::debug;

use crate::landmarks::LandmarkFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

pub struct SwipeDetector {
    capacity: usize,
    min_samples: usize,
    cooldown: f64,
    min_span: f64,
    max_span: f64,
    min_displacement: f32,
    /// (centroid x, timestamp), oldest first, bounded to `capacity`.
    history: VecDeque<(f32, f64)>,
    /// Starts at -inf so the first swipe is not blocked by the cooldown.
    last_swipe: f64,
}

impl SwipeDetector {
    pub fn new(
        capacity: usize,
        min_samples: usize,
        cooldown: f64,
        min_span: f64,
        max_span: f64,
        min_displacement: f32,
    ) -> Self {
        Self {
            capacity,
            min_samples,
            cooldown,
            min_span,
            max_span,
            min_displacement,
            history: VecDeque::with_capacity(capacity),
            last_swipe: f64::NEG_INFINITY,
        }
    }

    /// Feed one OPEN frame; returns a direction when a swipe completes.
    /// The whole history is cleared on detection so one motion cannot
    /// fire twice.
    pub fn update(&mut self, frame: &LandmarkFrame, now: f64) -> Option<SwipeDirection> {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((frame.centroid_x(), now));

        if self.history.len() < self.min_samples {
            return None;
        }
        if now - self.last_swipe < self.cooldown {
            return None;
        }

        let start = self.history.len() - self.min_samples;
        let (first_x, first_t) = self.history[start];
        let &(last_x, last_t) = self.history.back()?;

        let span = last_t - first_t;
        if span < self.min_span || span > self.max_span {
            return None;
        }

        let dx = last_x - first_x;
        if dx.abs() > self.min_displacement {
            self.last_swipe = now;
            self.history.clear();
            let direction = if dx < 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            };
            debug!("swipe {} (dx={:.3} over {:.2}s)", direction.as_str(), dx, span);
            return Some(direction);
        }

        None
    }

    /// Drop the centroid history when the gesture leaves OPEN; the
    /// cooldown intentionally survives.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
