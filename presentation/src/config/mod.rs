//! Presentation-level configuration
//!
//! Configuration for output formatting.

use crate::cli::commands::OutputFormat;

/// Narrowest column the side-by-side layout draws
pub const MIN_COLUMN_WIDTH: usize = 10;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Column width for side-by-side output
    pub width: usize,
    /// Print the response analysis after a comparison
    pub show_analysis: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::SideBySide,
            color: true,
            width: 45,
            show_analysis: true,
        }
    }
}

impl OutputConfig {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_COLUMN_WIDTH);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_analysis(mut self, show_analysis: bool) -> Self {
        self.show_analysis = show_analysis;
        self
    }

    /// Whether ANSI colors may be emitted for this configuration
    pub fn colors_enabled(&self) -> bool {
        self.color && self.format != OutputFormat::Json
    }

    /// Apply the color setting process-wide.
    ///
    /// Enabled colors still defer to `colored`'s own terminal detection.
    pub fn apply_color(&self) {
        if !self.colors_enabled() {
            colored::control::set_override(false);
        }
    }
}
