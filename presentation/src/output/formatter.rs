//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::config::OutputConfig;
use crate::output::{console::ConsoleFormatter, json::JsonFormatter, plain::PlainFormatter};
use promptlab_domain::{ComparisonResult, RenderedPrompt, SideResult, Technique};

/// Trait for formatting results
pub trait OutputFormatter {
    /// Format a finished comparison
    fn format_comparison(&self, result: &ComparisonResult) -> String;

    /// Format a single-technique answer
    fn format_answer(&self, result: &SideResult) -> String;

    /// Format the technique listing
    fn format_techniques(&self, techniques: &[Technique]) -> String;

    /// Format a rendered prompt
    fn format_rendered(&self, prompt: &RenderedPrompt) -> String;
}

/// Pick the formatter for the configured output format.
pub fn formatter_for(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::SideBySide => Box::new(ConsoleFormatter::new(
            config.width,
            config.show_analysis,
        )),
        OutputFormat::Plain => Box::new(PlainFormatter::new(config.show_analysis)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.show_analysis)),
    }
}
