//! Comparison value objects - request and paired result types.
//!
//! - [`ComparisonRequest`] - one query, two technique ids, one model
//! - [`SideResult`] - outcome of one side, tagged success or error
//! - [`ComparisonResult`] - both sides, kept in A/B order

use crate::comparison::analysis::{ResponseAnalysis, analyze};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Which half of a comparison a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to compare two techniques on one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub query: String,
    pub technique_a: String,
    /// May equal `technique_a`; both sides are still dispatched
    pub technique_b: String,
    pub model: Model,
}

impl ComparisonRequest {
    pub fn new(
        query: impl Into<String>,
        technique_a: impl Into<String>,
        technique_b: impl Into<String>,
        model: Model,
    ) -> Self {
        Self {
            query: query.into(),
            technique_a: technique_a.into(),
            technique_b: technique_b.into(),
            model,
        }
    }

    pub fn technique(&self, side: Side) -> &str {
        match side {
            Side::A => &self.technique_a,
            Side::B => &self.technique_b,
        }
    }
}

/// A source document the backend grounded its answer on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Source location, e.g. `s3://bucket/cases/case-0042.md`
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Citation {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            excerpt: None,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}

/// Successful backend payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl Generation {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

/// Category of a per-side failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The side exceeded the comparison timeout
    Timeout,
    /// The caller cancelled before the side completed
    Cancelled,
    Throttled,
    ModelNotAvailable,
    Connection,
    RequestFailed,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Cancelled => "cancelled",
            FailureKind::Throttled => "throttled",
            FailureKind::ModelNotAvailable => "model_not_available",
            FailureKind::Connection => "connection",
            FailureKind::RequestFailed => "request_failed",
            FailureKind::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one side, serialized with a `status` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SideOutcome {
    Success {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        citations: Vec<Citation>,
    },
    Error {
        error_kind: FailureKind,
        error_message: String,
    },
}

/// Result of one side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideResult {
    pub technique: String,
    /// The text that was sent: the rendered prompt, or the raw query for a
    /// retrieval backend
    pub prompt: String,
    /// Answered by a backend that retrieves its own context (RAG)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retrieval: bool,
    #[serde(flatten)]
    pub outcome: SideOutcome,
    /// Wall-clock time of the backend call
    pub elapsed_ms: u64,
}

impl SideResult {
    pub fn success(
        technique: impl Into<String>,
        prompt: impl Into<String>,
        generation: Generation,
    ) -> Self {
        Self {
            technique: technique.into(),
            prompt: prompt.into(),
            retrieval: false,
            outcome: SideOutcome::Success {
                text: generation.text,
                citations: generation.citations,
            },
            elapsed_ms: 0,
        }
    }

    pub fn failure(
        technique: impl Into<String>,
        prompt: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            technique: technique.into(),
            prompt: prompt.into(),
            retrieval: false,
            outcome: SideOutcome::Error {
                error_kind: kind,
                error_message: message.into(),
            },
            elapsed_ms: 0,
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn with_retrieval(mut self, retrieval: bool) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SideOutcome::Success { .. })
    }

    /// Response text, if the side succeeded
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            SideOutcome::Success { text, .. } => Some(text),
            SideOutcome::Error { .. } => None,
        }
    }

    pub fn citations(&self) -> &[Citation] {
        match &self.outcome {
            SideOutcome::Success { citations, .. } => citations,
            SideOutcome::Error { .. } => &[],
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            SideOutcome::Success { .. } => None,
            SideOutcome::Error { error_kind, .. } => Some(*error_kind),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            SideOutcome::Success { .. } => None,
            SideOutcome::Error { error_message, .. } => Some(error_message),
        }
    }
}

/// Paired outcome of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub query: String,
    pub model: Model,
    pub result_a: SideResult,
    pub result_b: SideResult,
    /// Wall-clock time of the whole comparison
    pub elapsed_ms: u64,
}

impl ComparisonResult {
    pub fn new(
        query: impl Into<String>,
        model: Model,
        result_a: SideResult,
        result_b: SideResult,
    ) -> Self {
        Self {
            query: query.into(),
            model,
            result_a,
            result_b,
            elapsed_ms: 0,
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn side(&self, side: Side) -> &SideResult {
        match side {
            Side::A => &self.result_a,
            Side::B => &self.result_b,
        }
    }

    pub fn both_succeeded(&self) -> bool {
        self.result_a.is_success() && self.result_b.is_success()
    }

    /// True if any side was cut short by cancellation
    pub fn is_cancelled(&self) -> bool {
        [&self.result_a, &self.result_b]
            .iter()
            .any(|r| r.failure_kind() == Some(FailureKind::Cancelled))
    }

    /// Length and specificity comparison, when both sides have text
    pub fn analysis(&self) -> Option<ResponseAnalysis> {
        Some(analyze(self.result_a.text()?, self.result_b.text()?))
    }
}
