//! Ask use case
//!
//! Renders a query with a single technique and sends it to the backend.

use crate::config::BehaviorConfig;
use crate::ports::generation_backend::GenerationBackend;
use crate::use_cases::shared::{dispatch, outgoing_prompt, side_result};
use promptlab_domain::{Catalog, DomainError, FailureKind, Model, RenderEngine, SideResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Input for the Ask use case
#[derive(Debug, Clone)]
pub struct AskInput {
    pub query: String,
    pub technique: String,
    pub model: Model,
}

impl AskInput {
    pub fn new(query: impl Into<String>, technique: impl Into<String>, model: Model) -> Self {
        Self {
            query: query.into(),
            technique: technique.into(),
            model,
        }
    }
}

/// Use case for a single-technique query
pub struct AskTechniqueUseCase<B: GenerationBackend + ?Sized> {
    backend: Arc<B>,
    catalog: Arc<Catalog>,
    config: BehaviorConfig,
    cancellation_token: Option<CancellationToken>,
}

impl<B: GenerationBackend + ?Sized> AskTechniqueUseCase<B> {
    pub fn new(backend: Arc<B>, catalog: Arc<Catalog>) -> Self {
        Self {
            backend,
            catalog,
            config: BehaviorConfig::default(),
            cancellation_token: None,
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Render and send the query.
    ///
    /// Rendering errors are returned as `Err`; backend failures come back as
    /// an error-tagged [`SideResult`]. A retrieval backend receives the query
    /// verbatim once it has passed validation.
    pub async fn execute(&self, input: AskInput) -> Result<SideResult, DomainError> {
        let rendered = RenderEngine::new(self.config.max_query_chars).render(
            &self.catalog,
            &input.technique,
            &input.query,
        )?;
        let retrieval = self.backend.uses_retrieval();
        let prompt = outgoing_prompt(rendered, &input.query, retrieval);

        info!(
            technique = %prompt.technique_id,
            model = %input.model,
            backend = self.backend.name(),
            "Sending query"
        );

        let call = dispatch(
            self.backend.as_ref(),
            &prompt.text,
            &input.model,
            self.config.timeout,
        );

        let result = match self.cancellation_token {
            Some(ref token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("Query cancelled");
                    SideResult::failure(
                        &prompt.technique_id,
                        &prompt.text,
                        FailureKind::Cancelled,
                        "query cancelled",
                    )
                }
                (result, elapsed) = call => side_result(&prompt, result, elapsed, self.config.timeout),
            },
            None => {
                let (result, elapsed) = call.await;
                side_result(&prompt, result, elapsed, self.config.timeout)
            }
        };

        Ok(result.with_retrieval(retrieval))
    }
}
