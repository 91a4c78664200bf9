//! Transcript logger port
//!
//! Structured, append-only logging of run events. Implementations must
//! never fail the run; a logger that cannot write should drop the event.

use serde_json::Value;

/// One loggable run event
pub struct TranscriptEvent {
    pub event_type: String,
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Sink for run events
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op logger
pub struct NoTranscriptLog;

impl TranscriptLogger for NoTranscriptLog {
    fn log(&self, _event: TranscriptEvent) {}
}
