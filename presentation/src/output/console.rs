//! Console output formatter for comparison results

use crate::output::formatter::OutputFormatter;
use crate::output::text::{center, fit, wrap_text};
use colored::Colorize;
use promptlab_domain::{
    Citation, ComparisonResult, RenderedPrompt, ResponseAnalysis, Side, SideOutcome, SideResult,
    Technique, Verdict,
};

const SEPARATOR: &str = " │ ";

/// Formats results as two wrapped columns
pub struct ConsoleFormatter {
    width: usize,
    show_analysis: bool,
}

impl ConsoleFormatter {
    pub fn new(width: usize, show_analysis: bool) -> Self {
        Self {
            width,
            show_analysis,
        }
    }

    fn rule(&self) -> String {
        "=".repeat(self.width * 2 + SEPARATOR.chars().count())
    }

    fn side_by_side(&self, result: &ComparisonResult) -> String {
        let mut left = body_lines(&result.result_a, self.width);
        let mut right = body_lines(&result.result_b, self.width);

        // Pad to equal length
        let rows = left.len().max(right.len());
        left.resize(rows, String::new());
        right.resize(rows, String::new());

        let left_failed = !result.result_a.is_success();
        let right_failed = !result.result_b.is_success();

        let mut output = String::new();
        output.push_str(&format!("\n{}\n", self.rule().cyan()));
        output.push_str(&format!(
            "{}{}{}\n",
            center(&side_title(Side::A, &result.result_a), self.width)
                .cyan()
                .bold(),
            SEPARATOR,
            center(&side_title(Side::B, &result.result_b), self.width)
                .cyan()
                .bold(),
        ));
        output.push_str(&format!("{}\n", self.rule().cyan()));

        for (l, r) in left.iter().zip(&right) {
            let l = fit(l, self.width);
            let r = fit(r, self.width);
            output.push_str(&format!(
                "{}{}{}\n",
                if left_failed { l.red() } else { l.normal() },
                SEPARATOR,
                if right_failed { r.red() } else { r.normal() },
            ));
        }
        output.push_str(&format!("{}\n", self.rule().cyan()));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_comparison(&self, result: &ComparisonResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), result.query));
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), result.model));

        output.push_str(&self.side_by_side(result));

        for side in [Side::A, Side::B] {
            let side_result = result.side(side);
            if !side_result.citations().is_empty() {
                output.push_str(&format!(
                    "\n{}\n",
                    format!("Sources ({})", side_title(side, side_result)).bold()
                ));
                output.push_str(&format_citations(side_result.citations()));
            }
        }

        if self.show_analysis {
            output.push_str(&format_analysis_section(result));
        }

        output.push_str(&footer(result));
        output
    }

    fn format_answer(&self, result: &SideResult) -> String {
        format_answer_block(result)
    }

    fn format_techniques(&self, techniques: &[Technique]) -> String {
        format_technique_list(techniques)
    }

    fn format_rendered(&self, prompt: &RenderedPrompt) -> String {
        format!(
            "{}\n{}\n{}\n{}\n",
            format!("── {} ({}) ──", prompt.technique_id, prompt.template_id)
                .yellow()
                .bold(),
            prompt.text,
            "─".repeat(40).dimmed(),
            format!("{} characters", prompt.text.chars().count()).dimmed(),
        )
    }
}

/// Column heading for one side
pub(crate) fn side_title(side: Side, result: &SideResult) -> String {
    if result.retrieval {
        format!("{}: {} (RAG)", side, result.technique)
    } else {
        format!("{}: {}", side, result.technique)
    }
}

/// Text shown for a side: the answer, or a one-line failure note
pub(crate) fn side_body(result: &SideResult) -> String {
    match &result.outcome {
        SideOutcome::Success { text, .. } => text.clone(),
        SideOutcome::Error {
            error_kind,
            error_message,
        } => format!("[{}] {}", error_kind, error_message),
    }
}

fn body_lines(result: &SideResult, width: usize) -> Vec<String> {
    wrap_text(&side_body(result), width)
}

/// Numbered citation list
pub(crate) fn format_citations(citations: &[Citation]) -> String {
    let mut output = String::new();
    for (i, citation) in citations.iter().enumerate() {
        output.push_str(&format!("  [{}] {}\n", i + 1, citation.source));
        if let Some(excerpt) = &citation.excerpt {
            output.push_str(&format!("      {}\n", excerpt.dimmed()));
        }
    }
    output
}

/// Analysis block, or the reason there is none
pub(crate) fn format_analysis_section(result: &ComparisonResult) -> String {
    match result.analysis() {
        Some(analysis) => format_analysis(result, &analysis),
        None => {
            let failed: Vec<String> = [Side::A, Side::B]
                .into_iter()
                .filter_map(|side| {
                    result
                        .side(side)
                        .failure_kind()
                        .map(|kind| format!("{} ({})", side, kind))
                })
                .collect();
            format!(
                "\n{} {}\n",
                "Analysis skipped:".yellow().bold(),
                format!("failed side {}", failed.join(", ")).dimmed()
            )
        }
    }
}

pub(crate) fn format_analysis(result: &ComparisonResult, analysis: &ResponseAnalysis) -> String {
    let a = side_title(Side::A, &result.result_a);
    let b = side_title(Side::B, &result.result_b);

    let mut output = String::new();
    output.push_str(&format!("\n{}\n{}\n", "Analysis:".cyan().bold(), "-".repeat(40)));
    output.push_str(&format!("{}: {} characters\n", a, analysis.length_a));
    output.push_str(&format!("{}: {} characters\n", b, analysis.length_b));
    output.push_str(&format!(
        "Difference: {:+} characters\n",
        analysis.length_difference
    ));
    output.push_str("\nSpecificity Score (higher = more specific):\n");
    output.push_str(&format!("  {}: {}\n", a, analysis.specificity_a));
    output.push_str(&format!("  {}: {}\n", b, analysis.specificity_b));

    let verdict = match analysis.verdict {
        Verdict::AMoreSpecific => format!("{} appears more specific and actionable", a).green(),
        Verdict::BMoreSpecific => format!("{} appears more specific and actionable", b).green(),
        Verdict::Similar => "Similar specificity levels".normal(),
    };
    output.push_str(&format!("\n{}\n", verdict));
    output
}

pub(crate) fn format_answer_block(result: &SideResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}\n",
        format!("── {} ──", result.technique).yellow().bold()
    ));

    match &result.outcome {
        SideOutcome::Success { text, citations } => {
            output.push_str(text);
            output.push('\n');
            if !citations.is_empty() {
                output.push_str(&format!("\n{}\n", "Sources:".bold()));
                output.push_str(&format_citations(citations));
            }
        }
        SideOutcome::Error {
            error_kind,
            error_message,
        } => {
            output.push_str(&format!(
                "{} {}\n",
                format!("Error ({}):", error_kind).red().bold(),
                error_message
            ));
        }
    }

    output.push_str(&format!(
        "{}\n",
        format!("{} ms", result.elapsed_ms).dimmed()
    ));
    output
}

pub(crate) fn format_technique_list(techniques: &[Technique]) -> String {
    let mut output = String::new();
    for technique in techniques {
        output.push_str(&format!(
            "{}  {}\n",
            technique.id.green().bold(),
            technique.display_name.bold()
        ));
        if !technique.description.is_empty() {
            output.push_str(&format!("    {}\n", technique.description));
        }
        for guidance in &technique.usage_guidance {
            output.push_str(&format!("    {} {}\n", "+".green(), guidance));
        }
        for limitation in &technique.limitations {
            output.push_str(&format!("    {} {}\n", "-".red(), limitation));
        }
        output.push('\n');
    }
    output
}

fn footer(result: &ComparisonResult) -> String {
    let mut line = format!("{} ms", result.elapsed_ms);
    if result.is_cancelled() {
        line.push_str(" (cancelled)");
    }
    format!("\n{}\n", line.dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptlab_domain::{FailureKind, Generation, Model};

    fn result(b: SideResult) -> ComparisonResult {
        ComparisonResult::new(
            "Lambda timeout",
            Model::ClaudeSonnet45,
            SideResult::success(
                "default",
                "Answer: Lambda timeout",
                Generation::from_text("Raise the timeout in the function configuration."),
            ),
            b,
        )
        .with_elapsed_ms(1200)
    }

    #[test]
    fn test_columns_have_fixed_width() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter::new(20, false);
        let b = SideResult::success(
            "cot",
            "Think: Lambda timeout",
            Generation::from_text("Step 1: check the logs. Step 2: raise the timeout."),
        );
        let output = formatter.format_comparison(&result(b));

        let rows: Vec<&str> = output.lines().filter(|l| l.contains(SEPARATOR)).collect();
        assert!(rows.len() > 2);
        for row in rows {
            assert_eq!(row.chars().count(), 20 * 2 + 3, "{:?}", row);
        }
        assert!(output.contains("A: default"));
        assert!(output.contains("B: cot"));
    }

    #[test]
    fn test_retrieval_side_is_labelled() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter::new(30, false);
        let b = SideResult::success(
            "default",
            "Lambda timeout",
            Generation::from_text("Case 12 raised the timeout to 60 seconds."),
        )
        .with_retrieval(true);
        let output = formatter.format_comparison(&result(b));

        assert!(output.contains("B: default (RAG)"));
        assert!(!output.contains("A: default (RAG)"));
    }

    #[test]
    fn test_failed_side_shows_kind_and_skips_analysis() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter::new(45, true);
        let b = SideResult::failure(
            "cot",
            "Think: Lambda timeout",
            FailureKind::Timeout,
            "no response within 120s",
        );
        let output = formatter.format_comparison(&result(b));

        assert!(output.contains("[timeout] no response within 120s"));
        assert!(output.contains("Analysis skipped:"));
        assert!(output.contains("B (timeout)"));
    }

    #[test]
    fn test_analysis_section() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter::new(45, true);
        let b = SideResult::success(
            "cot",
            "Think",
            Generation::from_text("Step 1: open console.aws.amazon.com. Specifically, in your case..."),
        );
        let output = formatter.format_comparison(&result(b));

        assert!(output.contains("Specificity Score"));
        assert!(output.contains("B: cot appears more specific and actionable"));
    }

    #[test]
    fn test_answer_lists_numbered_citations() {
        colored::control::set_override(false);
        let answer = SideResult::success(
            "default",
            "Answer: q",
            Generation::from_text("Use a VPC endpoint.").with_citations(vec![
                Citation::new("s3://kb/case-1.md").with_excerpt("VPC endpoint"),
                Citation::new("s3://kb/case-2.md"),
            ]),
        );
        let output = ConsoleFormatter::new(45, true).format_answer(&answer);
        assert!(output.contains("[1] s3://kb/case-1.md"));
        assert!(output.contains("[2] s3://kb/case-2.md"));
    }

    #[test]
    fn test_technique_list_shows_guidance() {
        colored::control::set_override(false);
        let techniques = vec![
            Technique::new("cot", "Chain-of-thought", "tpl-cot")
                .with_guidance(["Troubleshooting"])
                .with_limitations(["Slow"]),
        ];
        let output = ConsoleFormatter::new(45, true).format_techniques(&techniques);
        assert!(output.contains("cot  Chain-of-thought"));
        assert!(output.contains("+ Troubleshooting"));
        assert!(output.contains("- Slow"));
    }
}
