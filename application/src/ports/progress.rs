//! Progress notification port
//!
//! Defines the interface for reporting progress while a comparison runs.

use promptlab_domain::{ComparisonRequest, ComparisonResult, Side, SideResult};

/// Callback for progress updates during a comparison
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain lines, nothing).
pub trait ComparisonProgress: Send + Sync {
    /// Called once both prompts rendered, before dispatch
    fn on_comparison_start(&self, _request: &ComparisonRequest) {}

    /// Called when a side is dispatched to the backend
    fn on_side_start(&self, side: Side, technique: &str);

    /// Called when a side finishes (success, error, timeout or cancellation)
    fn on_side_complete(&self, side: Side, result: &SideResult);

    /// Called when the paired result is ready
    fn on_comparison_complete(&self, _result: &ComparisonResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ComparisonProgress for NoProgress {
    fn on_side_start(&self, _side: Side, _technique: &str) {}
    fn on_side_complete(&self, _side: Side, _result: &SideResult) {}
}
