// src/session.rs - per-frame orchestration of the gesture controllers
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activation::{ActivationMachine, Mode};
use crate::cursor::CursorSmoother;
use crate::gesture::{self, Gesture};
use crate::landmarks::{index, LandmarkFrame};
use crate::pinch::{PinchController, PinchEvent};
use crate::scroll::ScrollController;
use crate::swipe::{SwipeDetector, SwipeDirection};

/// All tunables in one place; `Default` carries the stock thresholds.
/// Loadable from a JSON file, any omitted field keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Target surface dimensions in pixels (supplied by the OS collaborator).
    pub screen_width: u32,
    pub screen_height: u32,

    /// Sliding window (seconds) and fist count required to activate.
    pub activation_window: f64,
    pub activation_count: usize,

    /// Thumb-to-index distance below which a pinch is recognized.
    pub pinch_threshold: f32,
    /// Hold duration (seconds) separating a click from a selection.
    pub hold_threshold: f64,
    /// Minimum time (seconds) between emitted clicks.
    pub click_cooldown: f64,

    /// Accumulated vertical motion that triggers a scroll event.
    pub scroll_threshold: f32,
    /// Scroll amount per normalized unit of accumulated motion.
    pub scroll_gain: f32,

    pub swipe_history: usize,
    pub swipe_min_samples: usize,
    pub swipe_cooldown: f64,
    pub swipe_min_span: f64,
    pub swipe_max_span: f64,
    pub swipe_displacement: f32,

    /// Dead border of the camera image excluded from cursor tracking.
    pub cursor_margin: f32,
    /// Exponential smoothing factor per frame.
    pub cursor_smoothing: f32,
    pub cursor_history: usize,

    /// Directory for per-session CSV action logs; None disables logging.
    pub action_log_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            activation_window: 3.0,
            activation_count: 3,
            pinch_threshold: 0.06,
            hold_threshold: 0.6,
            click_cooldown: 0.4,
            scroll_threshold: 0.005,
            scroll_gain: 1200.0,
            swipe_history: 12,
            swipe_min_samples: 8,
            swipe_cooldown: 0.8,
            swipe_min_span: 0.15,
            swipe_max_span: 0.8,
            swipe_displacement: 0.18,
            cursor_margin: 0.05,
            cursor_smoothing: 0.4,
            cursor_history: 5,
            action_log_dir: None,
        }
    }
}

/// A discrete UI action produced by one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Move { x: i32, y: i32 },
    Click,
    /// Long-hold selection signal; observable output only, not injected.
    Selected,
    Scroll { amount: i32 },
    Shortcut { name: String },
}

/// Everything one processed frame produced, for the injector, the
/// overlay and the action log.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub mode: Mode,
    pub gesture: Gesture,
    pub actions: Vec<UiAction>,
    /// Human-readable status line for the overlay.
    pub message: Option<String>,
    /// Pinch hold progress in [0,1] while a pinch is in flight.
    pub pinch_progress: Option<f32>,
}

/// Owns every piece of mutable per-frame state; one instance per run,
/// mutated only from the single frame-loop thread.
pub struct HandsFreeSession {
    activation: ActivationMachine,
    cursor: CursorSmoother,
    pinch: PinchController,
    scroll: ScrollController,
    swipe: SwipeDetector,
    activation_count: usize,
}

impl HandsFreeSession {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            activation: ActivationMachine::new(config.activation_window, config.activation_count),
            cursor: CursorSmoother::new(
                config.cursor_margin,
                config.cursor_smoothing,
                config.cursor_history,
                config.screen_width,
                config.screen_height,
            ),
            pinch: PinchController::new(
                config.pinch_threshold,
                config.hold_threshold,
                config.click_cooldown,
            ),
            scroll: ScrollController::new(config.scroll_threshold, config.scroll_gain),
            swipe: SwipeDetector::new(
                config.swipe_history,
                config.swipe_min_samples,
                config.swipe_cooldown,
                config.swipe_min_span,
                config.swipe_max_span,
                config.swipe_displacement,
            ),
            activation_count: config.activation_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.activation.mode()
    }

    /// External ACTIVE -> STANDBY command; applied between frames.
    pub fn deactivate(&mut self) {
        self.activation.deactivate();
    }

    /// Classify and route one frame. `None` means no hand was detected,
    /// which behaves as gesture NONE. `now` is sampled once by the caller
    /// so every decision in the frame sees the same clock.
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>, now: f64) -> FrameOutput {
        let gesture = frame.map(gesture::classify).unwrap_or(Gesture::None);
        let mut out = FrameOutput {
            mode: self.activation.mode(),
            gesture,
            actions: Vec::new(),
            message: None,
            pinch_progress: None,
        };

        if !self.activation.is_active() {
            // Standby: only the activation machine sees gestures.
            self.reset_transient_controllers();
            self.activation.update(gesture, now);
            out.mode = self.activation.mode();
            if self.activation.is_active() {
                out.message = Some("ACTIVATED".to_string());
            } else if self.activation.fist_count() > 0 {
                out.message = Some(format!(
                    "Fist count: {}/{}",
                    self.activation.fist_count(),
                    self.activation_count
                ));
            }
            return out;
        }

        // Active: exactly one controller per gesture; the others are
        // reset so stale state cannot leak across a gesture change.
        match (gesture, frame) {
            (Gesture::Point, Some(frame)) => {
                self.scroll.reset();
                self.swipe.reset();
                let (x, y) = self.cursor.update(frame.point(index::INDEX_TIP));
                out.actions.push(UiAction::Move { x, y });
                let pinch = self.pinch.update(frame, now);
                out.pinch_progress = pinch.progress;
                match pinch.event {
                    Some(PinchEvent::Click) => {
                        out.actions.push(UiAction::Click);
                        out.message = Some("CLICK!".to_string());
                    }
                    Some(PinchEvent::Selected) => {
                        out.actions.push(UiAction::Selected);
                        out.message = Some("SELECTED!".to_string());
                    }
                    None => {}
                }
            }
            (Gesture::Peace, Some(frame)) => {
                self.pinch.reset();
                self.swipe.reset();
                if let Some(amount) = self.scroll.update(frame) {
                    out.actions.push(UiAction::Scroll { amount });
                }
                out.message = Some("SCROLLING".to_string());
            }
            (Gesture::Open, Some(frame)) => {
                self.pinch.reset();
                self.scroll.reset();
                if let Some(direction) = self.swipe.update(frame, now) {
                    let (name, message) = match direction {
                        SwipeDirection::Left => ("alt+left", "GO BACK"),
                        SwipeDirection::Right => ("alt+right", "GO FORWARD"),
                    };
                    out.actions.push(UiAction::Shortcut {
                        name: name.to_string(),
                    });
                    out.message = Some(message.to_string());
                    debug!("swipe {} -> {}", direction.as_str(), name);
                }
            }
            (Gesture::Fist, _) => {
                // Drag placeholder: recognized but performs no action yet.
                self.reset_transient_controllers();
                out.message = Some("FIST".to_string());
            }
            _ => {
                // NONE, or a frame-less gesture: nothing runs this frame.
                self.reset_transient_controllers();
            }
        }

        out
    }

    /// The cursor smoother is deliberately excluded: its history persists
    /// across gestures so pointing resumes where it left off.
    fn reset_transient_controllers(&mut self) {
        self.pinch.reset();
        self.scroll.reset();
        self.swipe.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::testframes::{point_with_pinch_distance, shifted_x, with_fingers};

    fn session() -> HandsFreeSession {
        HandsFreeSession::new(&SessionConfig::default())
    }

    /// Drive the session straight to ACTIVE with three fist pulses.
    fn activate(s: &mut HandsFreeSession, t0: f64) -> f64 {
        let fist = with_fingers(false, false, false, false);
        let mut t = t0;
        for _ in 0..3 {
            s.process_frame(Some(&fist), t);
            s.process_frame(None, t + 0.1);
            t += 0.2;
        }
        assert_eq!(s.mode(), Mode::Active);
        t
    }

    #[test]
    fn standby_routes_only_to_activation() {
        let mut s = session();
        let point = with_fingers(true, false, false, false);
        let out = s.process_frame(Some(&point), 0.0);
        assert_eq!(out.mode, Mode::Standby);
        assert!(out.actions.is_empty());
    }

    #[test]
    fn standby_reports_fist_progress_then_activation() {
        let mut s = session();
        let fist = with_fingers(false, false, false, false);
        let out = s.process_frame(Some(&fist), 0.0);
        assert_eq!(out.message.as_deref(), Some("Fist count: 1/3"));
        s.process_frame(None, 0.1);
        s.process_frame(Some(&fist), 0.2);
        s.process_frame(None, 0.3);
        let out = s.process_frame(Some(&fist), 0.4);
        assert_eq!(out.message.as_deref(), Some("ACTIVATED"));
        assert_eq!(out.mode, Mode::Active);
    }

    #[test]
    fn point_moves_cursor_every_frame() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        let point = with_fingers(true, false, false, false);
        let out = s.process_frame(Some(&point), t);
        assert!(matches!(out.actions[0], UiAction::Move { .. }));
    }

    #[test]
    fn pinch_click_flows_through_session() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        s.process_frame(Some(&point_with_pinch_distance(0.02)), t);
        let out = s.process_frame(Some(&point_with_pinch_distance(0.2)), t + 0.2);
        assert!(out.actions.contains(&UiAction::Click));
        assert_eq!(out.message.as_deref(), Some("CLICK!"));
    }

    #[test]
    fn gesture_change_mid_pinch_starts_fresh_cycle() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        // start a pinch, then flip to PEACE, then back to POINT
        s.process_frame(Some(&point_with_pinch_distance(0.02)), t);
        s.process_frame(Some(&with_fingers(true, true, false, false)), t + 0.1);
        // re-pinch much later; a stale hold timer would make this release
        // a "long hold" and swallow the click
        s.process_frame(Some(&point_with_pinch_distance(0.02)), t + 2.0);
        let out = s.process_frame(Some(&point_with_pinch_distance(0.2)), t + 2.1);
        assert!(out.actions.contains(&UiAction::Click));
    }

    #[test]
    fn peace_scrolls_and_reports() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        let peace = with_fingers(true, true, false, false);
        let out = s.process_frame(Some(&peace), t);
        assert_eq!(out.message.as_deref(), Some("SCROLLING"));
        assert!(out.actions.is_empty());
    }

    #[test]
    fn open_sweep_emits_navigation_shortcut() {
        let mut s = session();
        let mut t = activate(&mut s, 0.0);
        let open = with_fingers(true, true, true, true);
        let mut fired = None;
        for i in 0..8 {
            let frame = shifted_x(&open, -0.25 * i as f32 / 7.0);
            let out = s.process_frame(Some(&frame), t);
            if !out.actions.is_empty() {
                fired = Some(out);
            }
            t += 0.04;
        }
        let out = fired.expect("swipe should have fired");
        assert_eq!(
            out.actions[0],
            UiAction::Shortcut {
                name: "alt+left".to_string()
            }
        );
        assert_eq!(out.message.as_deref(), Some("GO BACK"));
    }

    #[test]
    fn none_while_active_emits_nothing() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        let out = s.process_frame(None, t);
        assert_eq!(out.mode, Mode::Active);
        assert_eq!(out.gesture, Gesture::None);
        assert!(out.actions.is_empty());
    }

    #[test]
    fn deactivate_returns_to_standby_routing() {
        let mut s = session();
        let t = activate(&mut s, 0.0);
        s.deactivate();
        let point = with_fingers(true, false, false, false);
        let out = s.process_frame(Some(&point), t);
        assert_eq!(out.mode, Mode::Standby);
        assert!(out.actions.is_empty());
    }
}
