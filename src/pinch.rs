//! Pinch-to-click and hold-to-select, active while the gesture is POINT.
//!
//! A pinch is the thumb and index fingertips closing below a distance
//! threshold. Releasing before the hold threshold is a click (rate
//! limited by a cooldown); holding past it emits a single SELECTED
//! signal for the current hold.

use tracing::debug;

use crate::landmarks::{distance, index, LandmarkFrame};

/// Discrete outcome of one pinch frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchEvent {
    /// Quick pinch-and-release.
    Click,
    /// Pinch held past the hold threshold; fires once per hold.
    Selected,
}

/// Per-frame pinch result: at most one event, plus the hold progress
/// fraction for the overlay while a pinch is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchUpdate {
    pub event: Option<PinchEvent>,
    pub progress: Option<f32>,
}

pub struct PinchController {
    pinch_threshold: f32,
    hold_threshold: f64,
    click_cooldown: f64,
    was_pinching: bool,
    pinch_start: Option<f64>,
    held: bool,
    /// Time of the last emitted click; starts at -inf so the first click
    /// is never blocked by the cooldown.
    last_click: f64,
}

impl PinchController {
    pub fn new(pinch_threshold: f32, hold_threshold: f64, click_cooldown: f64) -> Self {
        Self {
            pinch_threshold,
            hold_threshold,
            click_cooldown,
            was_pinching: false,
            pinch_start: None,
            held: false,
            last_click: f64::NEG_INFINITY,
        }
    }

    pub fn update(&mut self, frame: &LandmarkFrame, now: f64) -> PinchUpdate {
        let d = distance(
            frame.point(index::THUMB_TIP),
            frame.point(index::INDEX_TIP),
        );
        let is_pinching = d < self.pinch_threshold;
        let mut out = PinchUpdate::default();

        if is_pinching && !self.was_pinching {
            self.pinch_start = Some(now);
            self.held = false;
        }

        if is_pinching {
            if let Some(start) = self.pinch_start {
                let held_for = now - start;
                out.progress = Some((held_for / self.hold_threshold).min(1.0) as f32);
                if held_for > self.hold_threshold && !self.held {
                    self.held = true;
                    out.event = Some(PinchEvent::Selected);
                    debug!("pinch held {:.2}s: SELECTED", held_for);
                }
            }
        } else if self.was_pinching {
            let held_for = self.pinch_start.map(|s| now - s).unwrap_or(0.0);
            if held_for < self.hold_threshold && now - self.last_click > self.click_cooldown {
                out.event = Some(PinchEvent::Click);
                self.last_click = now;
                debug!("pinch released after {:.2}s: CLICK", held_for);
            }
            self.pinch_start = None;
            self.held = false;
        }

        self.was_pinching = is_pinching;
        out
    }

    /// Drop any in-flight pinch. Called when the gesture leaves POINT so
    /// a stale hold timer cannot survive a gesture change. The click
    /// cooldown intentionally survives.
    pub fn reset(&mut self) {
        self.was_pinching = false;
        self.pinch_start = None;
        self.held = false;
    }
}
