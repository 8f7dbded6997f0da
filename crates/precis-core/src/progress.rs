//! Inbound events on the realtime progress channel.
//!
//! The server pushes one JSON object per text frame, shaped as
//! `{"event": "<name>", "data": {...}}`. Three event kinds are recognized;
//! anything else is ignored so the server can add events without breaking
//! older clients. Correlation to the in-flight job is positional: the
//! session machine enforces a single submission at a time.

use crate::error::ChannelError;
use serde::Deserialize;

/// A progress notification for the currently submitting job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Page extraction progress with numeric completion.
    ExtractionProgress {
        current: u32,
        total: u32,
        status: String,
    },
    /// Summarization underway; status phrase only.
    SummarizationProgress { status: String },
    /// The job finished successfully.
    ProcessComplete { status: String },
}

impl ProgressEvent {
    /// Decodes one text frame.
    ///
    /// Returns `Ok(None)` for well-formed frames carrying an unrecognized
    /// event name, and an error for frames that are not valid JSON or lack
    /// an event name entirely.
    pub fn from_frame(frame: &str) -> Result<Option<ProgressEvent>, ChannelError> {
        let value: serde_json::Value = serde_json::from_str(frame)
            .map_err(|e| ChannelError::Decode(format!("invalid JSON frame: {}", e)))?;
        let Some(event) = value.get("event").and_then(|v| v.as_str()) else {
            return Err(ChannelError::Decode("frame missing event name".to_string()));
        };
        let event = event.to_string();
        match event.as_str() {
            "extraction_progress" | "summarization_progress" | "process_complete" => {
                serde_json::from_value(value)
                    .map(Some)
                    .map_err(|e| ChannelError::Decode(format!("bad {} payload: {}", event, e)))
            }
            _ => Ok(None),
        }
    }

    /// Completion percentage, only for events that carry numeric progress.
    pub fn percent(&self) -> Option<u8> {
        match self {
            ProgressEvent::ExtractionProgress { current, total, .. } => {
                if *total == 0 {
                    Some(0)
                } else {
                    Some(((*current as f64 / *total as f64) * 100.0).round() as u8)
                }
            }
            _ => None,
        }
    }

    /// Status phrase carried by every event.
    pub fn status(&self) -> &str {
        match self {
            ProgressEvent::ExtractionProgress { status, .. }
            | ProgressEvent::SummarizationProgress { status }
            | ProgressEvent::ProcessComplete { status } => status,
        }
    }

    /// True for the terminal success event.
    pub fn is_complete(&self) -> bool {
        matches!(self, ProgressEvent::ProcessComplete { .. })
    }
}

/// Folded progress state the UI renders as a bar plus a status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressDisplay {
    /// 0-100; only extraction events move it.
    pub percent: u8,
    pub status: String,
    pub complete: bool,
}

impl ProgressDisplay {
    /// Fresh display shown the moment a submission starts.
    pub fn reset(status: &str) -> ProgressDisplay {
        ProgressDisplay {
            percent: 0,
            status: status.to_string(),
            complete: false,
        }
    }

    /// Applies one inbound event.
    pub fn apply(&mut self, event: &ProgressEvent) {
        if let Some(percent) = event.percent() {
            self.percent = percent;
        }
        self.status = event.status().to_string();
        if event.is_complete() {
            self.complete = true;
        }
    }
}
