//! Standby/active state machine driven by repeated fist gestures.
//!
//! Three fist rising edges inside a sliding window arm the system;
//! deactivation only happens through an explicit external command.

use std::collections::VecDeque;

use tracing::debug;

use crate::gesture::Gesture;

/// Whether the session is interpreting gestures or waiting to be armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Standby,
    Active,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standby => "STANDBY",
            Self::Active => "ACTIVE",
        }
    }
}

pub struct ActivationMachine {
    mode: Mode,
    /// Timestamps of fist rising edges, bounded by the sliding window.
    fist_times: VecDeque<f64>,
    prev_fist: bool,
    window: f64,
    required: usize,
}

impl ActivationMachine {
    /// Starts in STANDBY with an empty edge history.
    pub fn new(window: f64, required: usize) -> Self {
        Self {
            mode: Mode::Standby,
            fist_times: VecDeque::new(),
            prev_fist: false,
            window,
            required,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode == Mode::Active
    }

    /// Fist edges currently inside the window, for the standby overlay.
    pub fn fist_count(&self) -> usize {
        self.fist_times.len()
    }

    /// Feed one frame's gesture. Only fist rising edges count: a held
    /// fist contributes a single entry no matter how many frames it spans.
    pub fn update(&mut self, gesture: Gesture, now: f64) {
        let is_fist = gesture == Gesture::Fist;

        if self.mode == Mode::Standby && is_fist && !self.prev_fist {
            self.fist_times.push_back(now);
            while self
                .fist_times
                .front()
                .is_some_and(|&t| now - t > self.window)
            {
                self.fist_times.pop_front();
            }
            if self.fist_times.len() >= self.required {
                self.fist_times.clear();
                self.mode = Mode::Active;
                debug!("activation: {} fists within {:.1}s, now ACTIVE", self.required, self.window);
            }
        }

        self.prev_fist = is_fist;
    }

    /// External deactivation command; takes effect immediately and clears
    /// the edge history so re-arming starts a fresh cycle.
    pub fn deactivate(&mut self) {
        if self.mode == Mode::Active {
            debug!("activation: deactivated by command");
        }
        self.mode = Mode::Standby;
        self.fist_times.clear();
        self.prev_fist = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ActivationMachine {
        ActivationMachine::new(3.0, 3)
    }

    /// One fist rising edge: fist for a frame, then not-fist.
    fn pulse_fist(m: &mut ActivationMachine, at: f64) {
        m.update(Gesture::Fist, at);
        m.update(Gesture::None, at + 0.05);
    }

    #[test]
    fn three_edges_within_window_activate() {
        let mut m = machine();
        pulse_fist(&mut m, 0.0);
        pulse_fist(&mut m, 1.0);
        assert!(!m.is_active());
        pulse_fist(&mut m, 2.0);
        assert!(m.is_active());
        // history cleared on transition
        assert_eq!(m.fist_count(), 0);
    }

    #[test]
    fn sustained_fist_counts_once() {
        let mut m = machine();
        for i in 0..10 {
            m.update(Gesture::Fist, i as f64 * 0.1);
        }
        assert!(!m.is_active());
        assert_eq!(m.fist_count(), 1);
    }

    #[test]
    fn edges_spanning_more_than_window_do_not_activate() {
        let mut m = machine();
        pulse_fist(&mut m, 0.0);
        pulse_fist(&mut m, 1.8);
        pulse_fist(&mut m, 3.5); // oldest edge fell out of the window
        assert!(!m.is_active());
        assert_eq!(m.fist_count(), 2);
    }

    #[test]
    fn stale_edges_still_combine_with_fresh_ones() {
        let mut m = machine();
        pulse_fist(&mut m, 0.0);
        pulse_fist(&mut m, 4.0);
        pulse_fist(&mut m, 4.5);
        pulse_fist(&mut m, 5.0);
        assert!(m.is_active());
    }

    #[test]
    fn deactivate_returns_to_standby() {
        let mut m = machine();
        pulse_fist(&mut m, 0.0);
        pulse_fist(&mut m, 0.5);
        pulse_fist(&mut m, 1.0);
        assert!(m.is_active());
        m.deactivate();
        assert_eq!(m.mode(), Mode::Standby);
        assert_eq!(m.fist_count(), 0);
    }

    #[test]
    fn no_counting_while_active() {
        let mut m = machine();
        pulse_fist(&mut m, 0.0);
        pulse_fist(&mut m, 0.5);
        pulse_fist(&mut m, 1.0);
        assert!(m.is_active());
        pulse_fist(&mut m, 1.5);
        assert_eq!(m.fist_count(), 0);
        assert!(m.is_active());
    }
}
