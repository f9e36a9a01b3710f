// src/bridge.rs - seams to the pose estimator, OS automation and overlay
//
// The pose-estimation collaborator delivers newline-delimited JSON; the
// OS-automation collaborator consumes one JSON action object per line.
// Both sides stay behind traits so the core runs identically against
// test doubles.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use nalgebra::Point2;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::landmarks::LandmarkFrame;
use crate::session::{FrameOutput, UiAction};

// ── Wire format ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PointWire {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct HandWire {
    landmarks: Vec<PointWire>,
}

/// One inbound line: either a frame (possibly with no hands) or a
/// control command.
#[derive(Debug, Deserialize)]
struct MessageWire {
    #[serde(default)]
    hands: Vec<HandWire>,
    #[serde(default)]
    command: Option<String>,
}

/// Decoded inbound event for the frame loop.
#[derive(Debug)]
pub enum FrameEvent {
    /// A frame with a detected hand. Only the first hand is used.
    Frame(LandmarkFrame),
    /// A frame with no hand in it.
    NoHand,
    /// Explicit ACTIVE -> STANDBY command.
    Deactivate,
    /// Stop the frame loop.
    Shutdown,
}

// ── Frame source ───────────────────────────────────────────

pub trait FrameSource {
    /// Next event from the collaborator; `None` means end-of-stream.
    fn next_event(&mut self) -> Result<Option<FrameEvent>>;
}

/// Reads the newline-delimited JSON protocol from any buffered reader
/// (stdin in production). Malformed lines and frames with the wrong
/// landmark count are reported and skipped; they never become actions.
pub struct JsonLineSource<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> JsonLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    fn decode(&self, line: &str) -> Option<FrameEvent> {
        let message: MessageWire = match serde_json::from_str(line) {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping malformed frame line: {e}");
                return None;
            }
        };

        if let Some(command) = message.command {
            return match command.as_str() {
                "deactivate" => Some(FrameEvent::Deactivate),
                "shutdown" => Some(FrameEvent::Shutdown),
                other => {
                    warn!("ignoring unknown command {other:?}");
                    None
                }
            };
        }

        let Some(hand) = message.hands.into_iter().next() else {
            return Some(FrameEvent::NoHand);
        };

        let points = hand
            .landmarks
            .iter()
            .map(|p| Point2::new(p.x, p.y))
            .collect();
        match LandmarkFrame::new(points) {
            Ok(frame) => Some(FrameEvent::Frame(frame)),
            Err(e) => {
                // Invalid geometry is a per-frame error: report, discard,
                // keep processing the stream.
                warn!("discarding frame: {e}");
                None
            }
        }
    }
}

impl<R: BufRead> FrameSource for JsonLineSource<R> {
    fn next_event(&mut self) -> Result<Option<FrameEvent>> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_line(&mut self.line)
                .context("reading frame stream")?;
            if n == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(event) = self.decode(line) {
                return Ok(Some(event));
            }
        }
    }
}

// ── Input injection ────────────────────────────────────────

/// The OS-automation collaborator. `move_cursor` is called every pointing
/// frame; the rest are already rate limited by the core.
pub trait InputInjector {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()>;
    fn click(&mut self) -> Result<()>;
    fn scroll(&mut self, amount: i32) -> Result<()>;
    fn send_shortcut(&mut self, name: &str) -> Result<()>;
}

/// Writes one JSON action object per line for a downstream injector
/// process to execute.
pub struct JsonLineInjector<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineInjector<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: serde_json::Value) -> Result<()> {
        writeln!(self.writer, "{value}").context("writing action")?;
        self.writer.flush().context("flushing action")?;
        Ok(())
    }
}

impl<W: Write> InputInjector for JsonLineInjector<W> {
    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.emit(json!({"action": "move", "x": x, "y": y}))
    }

    fn click(&mut self) -> Result<()> {
        self.emit(json!({"action": "click"}))
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        self.emit(json!({"action": "scroll", "amount": amount}))
    }

    fn send_shortcut(&mut self, name: &str) -> Result<()> {
        self.emit(json!({"action": "shortcut", "name": name}))
    }
}

/// Route a frame's actions into the injector. `Selected` is an
/// observable signal only and is deliberately not injected.
pub fn dispatch(actions: &[UiAction], injector: &mut dyn InputInjector) -> Result<()> {
    for action in actions {
        match action {
            UiAction::Move { x, y } => injector.move_cursor(*x, *y)?,
            UiAction::Click => injector.click()?,
            UiAction::Scroll { amount } => injector.scroll(*amount)?,
            UiAction::Shortcut { name } => injector.send_shortcut(name)?,
            UiAction::Selected => {}
        }
    }
    Ok(())
}

// ── Overlay ────────────────────────────────────────────────

/// Optional diagnostic sink; the core behaves identically with a no-op.
pub trait OverlaySink {
    fn render(&mut self, output: &FrameOutput);
}

/// Default overlay: a debug log line per interesting frame.
pub struct LogOverlay;

impl OverlaySink for LogOverlay {
    fn render(&mut self, output: &FrameOutput) {
        if output.message.is_some() || !output.actions.is_empty() {
            debug!(
                mode = output.mode.as_str(),
                gesture = output.gesture.as_str(),
                message = output.message.as_deref().unwrap_or(""),
                progress = output.pinch_progress.unwrap_or(0.0),
                "frame"
            );
        }
    }
}
