//! Port for structured comparison logging.
//!
//! Defines the [`ComparisonLogger`] trait for recording comparison events
//! (rendered prompts, per-side outcomes, timings) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable transcript (JSONL) that can be reviewed after a session.

use serde_json::Value;

/// A structured comparison event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
pub struct ComparisonEvent {
    /// Event type identifier (e.g., "comparison_started", "side_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ComparisonEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging comparison events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures are
/// swallowed by the adapter and never affect the comparison.
pub trait ComparisonLogger: Send + Sync {
    /// Record a comparison event.
    fn log(&self, event: ComparisonEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoComparisonLogger;

impl ComparisonLogger for NoComparisonLogger {
    fn log(&self, _event: ComparisonEvent) {}
}
