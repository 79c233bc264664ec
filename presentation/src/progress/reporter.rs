//! Progress reporting for comparisons

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use promptlab_application::ports::progress::ComparisonProgress;
use promptlab_domain::core::string::{single_line, truncate};
use promptlab_domain::{ComparisonRequest, Side, SideResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const MESSAGE_PREVIEW: usize = 60;

/// Reports progress with one spinner per side
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Side, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line summary of a finished side
fn completion_message(result: &SideResult) -> String {
    match (result.text(), result.failure_kind()) {
        (Some(text), _) => format!(
            "{} {} ({} chars, {} ms)",
            "v".green(),
            result.technique,
            text.chars().count(),
            result.elapsed_ms
        ),
        (None, Some(kind)) => format!(
            "{} {} ({}: {})",
            "x".red(),
            result.technique,
            kind,
            truncate(
                &single_line(result.error_message().unwrap_or_default()),
                MESSAGE_PREVIEW
            )
        ),
        (None, None) => format!("{} {}", "?".yellow(), result.technique),
    }
}

impl ComparisonProgress for ProgressReporter {
    fn on_side_start(&self, side: Side, technique: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Side {}", side));
        pb.set_message(format!("{} ...", technique));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(side, pb);
        }
    }

    fn on_side_complete(&self, side: Side, result: &SideResult) {
        let bar = self.bars.lock().ok().and_then(|mut bars| bars.remove(&side));
        if let Some(pb) = bar {
            pb.finish_with_message(completion_message(result));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ComparisonProgress for SimpleProgress {
    fn on_comparison_start(&self, request: &ComparisonRequest) {
        eprintln!(
            "{} {} vs {} on {}",
            "->".cyan(),
            request.technique_a.bold(),
            request.technique_b.bold(),
            request.model
        );
    }

    fn on_side_start(&self, side: Side, technique: &str) {
        eprintln!("  {} side {}: {}", "..".dimmed(), side, technique);
    }

    fn on_side_complete(&self, side: Side, result: &SideResult) {
        eprintln!("  side {}: {}", side, completion_message(result));
    }
}
