//! Scroll accumulation while the gesture is PEACE.
//!
//! Integrates the vertical motion of the index/middle fingertip pair and
//! emits a discrete scroll amount whenever the accumulated delta crosses
//! the threshold. Positive amounts mean upward hand motion (scroll up).

use crate::landmarks::{index, LandmarkFrame};

pub struct ScrollController {
    threshold: f32,
    gain: f32,
    prev_y: Option<f32>,
    accumulator: f32,
}

impl ScrollController {
    pub fn new(threshold: f32, gain: f32) -> Self {
        Self {
            threshold,
            gain,
            prev_y: None,
            accumulator: 0.0,
        }
    }

    /// Feed one PEACE frame; returns a scroll amount when the threshold
    /// is crossed. The first frame after a reset only anchors prev_y.
    pub fn update(&mut self, frame: &LandmarkFrame) -> Option<i32> {
        let center_y =
            (frame.point(index::INDEX_TIP).y + frame.point(index::MIDDLE_TIP).y) / 2.0;

        let mut emitted = None;
        if let Some(prev) = self.prev_y {
            let delta = prev - center_y;
            self.accumulator += delta;
            if self.accumulator.abs() > self.threshold {
                emitted = Some((self.accumulator * self.gain).round() as i32);
                self.accumulator = 0.0;
            }
        }
        self.prev_y = Some(center_y);
        emitted
    }

    /// Clear the anchor (and any sub-threshold drift) when the gesture
    /// leaves PEACE.
    pub fn reset(&mut self) {
        self.prev_y = None;
        self.accumulator = 0.0;
    }
}
