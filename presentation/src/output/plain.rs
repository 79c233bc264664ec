//! Plain sequential output (one section per side)

use crate::output::console::{
    format_analysis_section, format_answer_block, format_citations, format_technique_list,
    side_body, side_title,
};
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use promptlab_domain::{ComparisonResult, RenderedPrompt, Side, SideResult, Technique};

/// Formats results without columns, for narrow terminals and copy/paste
pub struct PlainFormatter {
    show_analysis: bool,
}

impl PlainFormatter {
    pub fn new(show_analysis: bool) -> Self {
        Self { show_analysis }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_comparison(&self, result: &ComparisonResult) -> String {
        let mut output = format!("Query: {}\nModel: {}\n", result.query, result.model);

        for side in [Side::A, Side::B] {
            let side_result = result.side(side);
            output.push_str(&format!(
                "\n{}\n",
                format!("== {} ==", side_title(side, side_result)).bold()
            ));
            output.push_str(&side_body(side_result));
            output.push('\n');
            if !side_result.citations().is_empty() {
                output.push_str("\nSources:\n");
                output.push_str(&format_citations(side_result.citations()));
            }
        }

        if self.show_analysis {
            output.push_str(&format_analysis_section(result));
        }
        output
    }

    fn format_answer(&self, result: &SideResult) -> String {
        format_answer_block(result)
    }

    fn format_techniques(&self, techniques: &[Technique]) -> String {
        format_technique_list(techniques)
    }

    fn format_rendered(&self, prompt: &RenderedPrompt) -> String {
        format!("{}\n", prompt.text)
    }
}
