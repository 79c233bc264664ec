//! Logging infrastructure: the comparison transcript.
//!
//! Provides [`JsonlComparisonLogger`], a JSONL file writer that implements
//! the [`ComparisonLogger`](promptlab_application::ComparisonLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlComparisonLogger;
