//! Comparison domain
//!
//! Request and result types for comparing two prompt techniques on the
//! same query, plus the response analysis shown after a comparison.

pub mod analysis;
pub mod value_objects;

pub use analysis::{ResponseAnalysis, SPECIFICITY_INDICATORS, Verdict, analyze, specificity_score};
pub use value_objects::{
    Citation, ComparisonRequest, ComparisonResult, FailureKind, Generation, Side, SideOutcome,
    SideResult,
};
