//! Generation backend port
//!
//! Defines the interface for sending a fully rendered prompt to an external
//! text-generation service (a model endpoint or a managed knowledge base).

use async_trait::async_trait;
use promptlab_domain::{FailureKind, Generation, Model};
use thiserror::Error;

/// Errors that can occur during a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl BackendError {
    /// Failure category recorded on the comparison side
    pub fn kind(&self) -> FailureKind {
        match self {
            BackendError::ConnectionError(_) => FailureKind::Connection,
            BackendError::Throttled(_) => FailureKind::Throttled,
            BackendError::ModelNotAvailable(_) => FailureKind::ModelNotAvailable,
            BackendError::RequestFailed(_) => FailureKind::RequestFailed,
            BackendError::Timeout => FailureKind::Timeout,
            BackendError::Other(_) => FailureKind::Other,
        }
    }
}

/// Backend for text generation
///
/// This port defines how the application layer reaches a generation service.
/// Implementations (adapters) live in the infrastructure layer and own any
/// transport concerns: authentication, input sanitization, retries, caching.
///
/// Failures must be returned as [`BackendError`] values; the comparison
/// use case runs two calls concurrently and relies on each failing in isolation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a response for a fully rendered prompt
    async fn generate(&self, prompt: &str, model: &Model) -> Result<Generation, BackendError>;

    /// Short name shown in logs and headers
    fn name(&self) -> &str {
        "backend"
    }

    /// Whether the backend retrieves its own context from the query.
    ///
    /// Retrieval backends run their search on the text they receive, so the
    /// use cases send them the raw query instead of the rendered prompt.
    fn uses_retrieval(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(BackendError::Timeout.kind(), FailureKind::Timeout);
        assert_eq!(
            BackendError::Throttled("rate".to_string()).kind(),
            FailureKind::Throttled
        );
        assert_eq!(
            BackendError::ConnectionError("dns".to_string()).kind(),
            FailureKind::Connection
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BackendError::RequestFailed("bad body".to_string()).to_string(),
            "Request failed: bad body"
        );
        assert_eq!(BackendError::Timeout.to_string(), "Timeout");
    }
}
