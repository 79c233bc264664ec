//! Offline backend that answers with the prompt it was given.
//!
//! Used by `--dry-run` to walk through a comparison without AWS credentials.
//! The retrieval variant stands in for a knowledge base side.

use async_trait::async_trait;
use promptlab_application::{BackendError, GenerationBackend};
use promptlab_domain::{Generation, Model};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct EchoBackend {
    delay: Option<Duration>,
    retrieval: bool,
}

impl EchoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait before answering, so progress output can be seen.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Behave like a knowledge base: receive the raw query instead of the
    /// rendered prompt
    pub fn with_retrieval(mut self) -> Self {
        self.retrieval = true;
        self
    }
}

#[async_trait]
impl GenerationBackend for EchoBackend {
    async fn generate(&self, prompt: &str, model: &Model) -> Result<Generation, BackendError> {
        debug!(model = %model, chars = prompt.chars().count(), "Echoing prompt");
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Generation::from_text(prompt))
    }

    fn name(&self) -> &str {
        if self.retrieval { "echo-kb" } else { "echo" }
    }

    fn uses_retrieval(&self) -> bool {
        self.retrieval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_returns_prompt() {
        let backend = EchoBackend::new();
        let generation = backend
            .generate("Answer: What is S3?", &Model::default())
            .await
            .unwrap();
        assert_eq!(generation.text, "Answer: What is S3?");
        assert!(generation.citations.is_empty());
    }

    #[tokio::test]
    async fn test_echo_delay() {
        let backend = EchoBackend::new().with_delay(Duration::from_millis(50));
        let started = std::time::Instant::now();
        backend.generate("x", &Model::default()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_retrieval_variant() {
        let backend = EchoBackend::new().with_retrieval();
        assert!(backend.uses_retrieval());
        assert_eq!(backend.name(), "echo-kb");
        assert!(!EchoBackend::new().uses_retrieval());
    }
}
