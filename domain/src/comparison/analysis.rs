//! Side-by-side response analysis
//!
//! A coarse heuristic for the classroom: response length and how many
//! "specific, actionable" markers each response contains.

use serde::{Deserialize, Serialize};

/// Markers of a concrete, actionable support answer (matched case-insensitively)
pub const SPECIFICITY_INDICATORS: &[&str] = &[
    "console.aws.amazon.com",
    "step 1",
    "step 2",
    "step 3",
    "first,",
    "second,",
    "third,",
    "specifically",
    "in your case",
];

/// Which response looks more specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AMoreSpecific,
    BMoreSpecific,
    Similar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    /// Length of response A in characters
    pub length_a: usize,
    pub length_b: usize,
    /// `length_b - length_a`
    pub length_difference: i64,
    pub specificity_a: usize,
    pub specificity_b: usize,
    pub verdict: Verdict,
}

/// Number of distinct indicators present in `text`
pub fn specificity_score(text: &str) -> usize {
    let lower = text.to_lowercase();
    SPECIFICITY_INDICATORS
        .iter()
        .filter(|indicator| lower.contains(*indicator))
        .count()
}

/// Compare two responses
pub fn analyze(a: &str, b: &str) -> ResponseAnalysis {
    let length_a = a.chars().count();
    let length_b = b.chars().count();
    let specificity_a = specificity_score(a);
    let specificity_b = specificity_score(b);

    let verdict = match specificity_a.cmp(&specificity_b) {
        std::cmp::Ordering::Greater => Verdict::AMoreSpecific,
        std::cmp::Ordering::Less => Verdict::BMoreSpecific,
        std::cmp::Ordering::Equal => Verdict::Similar,
    };

    ResponseAnalysis {
        length_a,
        length_b,
        length_difference: length_b as i64 - length_a as i64,
        specificity_a,
        specificity_b,
        verdict,
    }
}
