//! JSON output

use crate::output::formatter::OutputFormatter;
use promptlab_domain::{
    ComparisonResult, RenderedPrompt, ResponseAnalysis, SideResult, Technique,
};
use serde::Serialize;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter {
    include_analysis: bool,
}

#[derive(Serialize)]
struct ComparisonReport<'a> {
    #[serde(flatten)]
    result: &'a ComparisonResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<ResponseAnalysis>,
}

impl JsonFormatter {
    pub fn new(include_analysis: bool) -> Self {
        Self { include_analysis }
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_comparison(&self, result: &ComparisonResult) -> String {
        let report = ComparisonReport {
            result,
            analysis: if self.include_analysis {
                result.analysis()
            } else {
                None
            },
        };
        Self::to_json(&report)
    }

    fn format_answer(&self, result: &SideResult) -> String {
        Self::to_json(result)
    }

    fn format_techniques(&self, techniques: &[Technique]) -> String {
        Self::to_json(techniques)
    }

    fn format_rendered(&self, prompt: &RenderedPrompt) -> String {
        Self::to_json(prompt)
    }
}
