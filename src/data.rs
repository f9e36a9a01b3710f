// src/data.rs - optional per-session CSV log of emitted frame outputs
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::session::{FrameOutput, UiAction};

#[derive(Debug, Serialize)]
struct ActionRecord {
    timestamp: f64,
    mode: &'static str,
    gesture: &'static str,
    actions: String,
    message: Option<String>,
    pinch_progress: Option<f32>,
}

/// Append-only diagnostic log, one CSV file per session. Never read back
/// by the program; purely for offline inspection.
pub struct ActionLog {
    writer: Writer<File>,
    path: PathBuf,
}

impl ActionLog {
    pub fn create(output_dir: impl AsRef<Path>) -> Result<Self> {
        let file_name = format!("session_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        let path = output_dir.as_ref().join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("creating action log {}", path.display()))?;
        Ok(Self {
            writer: Writer::from_writer(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record frames that produced an action or a status message; silent
    /// frames are skipped to keep the log readable.
    pub fn record(&mut self, timestamp: f64, output: &FrameOutput) -> Result<()> {
        if output.actions.is_empty() && output.message.is_none() {
            return Ok(());
        }
        let record = ActionRecord {
            timestamp,
            mode: output.mode.as_str(),
            gesture: output.gesture.as_str(),
            actions: describe_actions(&output.actions),
            message: output.message.clone(),
            pinch_progress: output.pinch_progress,
        };
        self.writer.serialize(record).context("writing log record")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("flushing action log")?;
        Ok(())
    }
}

fn describe_actions(actions: &[UiAction]) -> String {
    actions
        .iter()
        .map(|a| match a {
            UiAction::Move { x, y } => format!("move({x},{y})"),
            UiAction::Click => "click".to_string(),
            UiAction::Selected => "selected".to_string(),
            UiAction::Scroll { amount } => format!("scroll({amount})"),
            UiAction::Shortcut { name } => format!("shortcut({name})"),
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_action_sequences() {
        let text = describe_actions(&[
            UiAction::Move { x: 4, y: 8 },
            UiAction::Scroll { amount: -12 },
            UiAction::Shortcut {
                name: "alt+right".to_string(),
            },
        ]);
        assert_eq!(text, "move(4,8);scroll(-12);shortcut(alt+right)");
    }

    #[test]
    fn describes_empty_sequence() {
        assert_eq!(describe_actions(&[]), "");
    }
}
