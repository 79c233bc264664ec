//! Compare Techniques use case
//!
//! Renders one query with two techniques and sends both prompts to the
//! backend at the same time, pairing the outcomes.

use crate::config::BehaviorConfig;
use crate::ports::comparison_logger::{ComparisonEvent, ComparisonLogger, NoComparisonLogger};
use crate::ports::generation_backend::{BackendError, GenerationBackend};
use crate::ports::progress::{ComparisonProgress, NoProgress};
use crate::use_cases::shared::{dispatch, outgoing_prompt, side_result};
use promptlab_domain::{
    Catalog, ComparisonRequest, ComparisonResult, DomainError, FailureKind, Generation,
    RenderEngine, RenderedPrompt, Side, SideResult,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that abort a comparison before anything is dispatched
///
/// Backend failures, timeouts and cancellation are not errors here: they
/// are recorded on the affected side of the [`ComparisonResult`].
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Cannot render side {side} with technique '{technique}': {source}")]
    Render {
        side: Side,
        technique: String,
        #[source]
        source: DomainError,
    },
}

impl CompareError {
    /// The underlying domain error
    pub fn domain_error(&self) -> &DomainError {
        match self {
            CompareError::Render { source, .. } => source,
        }
    }
}

/// Use case for comparing two prompt techniques side by side
///
/// Both sides share one backend unless [`with_side_backend`](Self::with_side_backend)
/// routes a side elsewhere, e.g. a knowledge base against a direct model call.
pub struct CompareTechniquesUseCase<B: GenerationBackend + ?Sized + 'static> {
    backend_a: Arc<B>,
    backend_b: Arc<B>,
    catalog: Arc<Catalog>,
    config: BehaviorConfig,
    logger: Arc<dyn ComparisonLogger>,
    cancellation_token: Option<CancellationToken>,
}

type JoinedSide = Result<(Side, Result<Generation, BackendError>, Duration), JoinError>;

impl<B: GenerationBackend + ?Sized + 'static> CompareTechniquesUseCase<B> {
    pub fn new(backend: Arc<B>, catalog: Arc<Catalog>) -> Self {
        Self {
            backend_a: Arc::clone(&backend),
            backend_b: backend,
            catalog,
            config: BehaviorConfig::default(),
            logger: Arc::new(NoComparisonLogger),
            cancellation_token: None,
        }
    }

    /// Send one side's prompt to a different backend
    pub fn with_side_backend(mut self, side: Side, backend: Arc<B>) -> Self {
        match side {
            Side::A => self.backend_a = backend,
            Side::B => self.backend_b = backend,
        }
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ComparisonLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Pending sides are reported as cancelled once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: ComparisonRequest,
    ) -> Result<ComparisonResult, CompareError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: ComparisonRequest,
        progress: &dyn ComparisonProgress,
    ) -> Result<ComparisonResult, CompareError> {
        // Render both sides before dispatching either
        let prompt_a = self.render(&request, Side::A)?;
        let prompt_b = self.render(&request, Side::B)?;
        let retrieval_a = self.backend_a.uses_retrieval();
        let retrieval_b = self.backend_b.uses_retrieval();
        let prompt_a = outgoing_prompt(prompt_a, &request.query, retrieval_a);
        let prompt_b = outgoing_prompt(prompt_b, &request.query, retrieval_b);

        info!(
            technique_a = %prompt_a.technique_id,
            technique_b = %prompt_b.technique_id,
            model = %request.model,
            backend_a = self.backend_a.name(),
            backend_b = self.backend_b.name(),
            "Starting comparison"
        );
        self.logger.log(ComparisonEvent::new(
            "comparison_started",
            serde_json::json!({
                "query": request.query,
                "model": request.model.as_str(),
                "technique_a": prompt_a.technique_id,
                "technique_b": prompt_b.technique_id,
                "backend_a": self.backend_a.name(),
                "backend_b": self.backend_b.name(),
                "prompt_a": prompt_a.text,
                "prompt_b": prompt_b.text,
            }),
        ));
        progress.on_comparison_start(&request);

        let started = Instant::now();
        let mut join_set = JoinSet::new();

        for (side, prompt, backend) in [
            (Side::A, &prompt_a, &self.backend_a),
            (Side::B, &prompt_b, &self.backend_b),
        ] {
            let backend = Arc::clone(backend);
            let model = request.model.clone();
            let text = prompt.text.clone();
            let timeout = self.config.timeout;

            progress.on_side_start(side, &prompt.technique_id);
            join_set.spawn(async move {
                let (result, elapsed) = dispatch(backend.as_ref(), &text, &model, timeout).await;
                (side, result, elapsed)
            });
        }

        let mut result_a: Option<SideResult> = None;
        let mut result_b: Option<SideResult> = None;
        let mut join_failure: Option<String> = None;

        let mut accept = |joined: JoinedSide| match joined {
            Ok((side, result, elapsed)) => {
                let (prompt, retrieval) = match side {
                    Side::A => (&prompt_a, retrieval_a),
                    Side::B => (&prompt_b, retrieval_b),
                };
                let outcome = side_result(prompt, result, elapsed, self.config.timeout)
                    .with_retrieval(retrieval);
                self.record_side(side, &outcome, progress);
                match side {
                    Side::A => result_a = Some(outcome),
                    Side::B => result_b = Some(outcome),
                }
            }
            Err(e) => {
                warn!("Comparison task join error: {}", e);
                join_failure = Some(e.to_string());
            }
        };

        let mut cancelled = false;
        loop {
            let joined = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        cancelled = true;
                        break;
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };

            match joined {
                Some(joined) => accept(joined),
                None => break,
            }
        }

        if cancelled {
            // Keep sides that finished before the token was observed
            while let Some(joined) = join_set.try_join_next() {
                accept(joined);
            }
            join_set.abort_all();
            info!("Comparison cancelled");
        }

        // Sides that never reported back were cancelled or their task died
        let (kind, message) = match (cancelled, join_failure) {
            (true, _) => (FailureKind::Cancelled, "comparison cancelled".to_string()),
            (false, Some(e)) => (FailureKind::Other, format!("backend task failed: {}", e)),
            (false, None) => (FailureKind::Other, "backend task did not report".to_string()),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let fill_missing =
            |side: Side, slot: Option<SideResult>, prompt: &RenderedPrompt, retrieval: bool| {
                slot.unwrap_or_else(|| {
                    let outcome = SideResult::failure(
                        &prompt.technique_id,
                        &prompt.text,
                        kind,
                        message.clone(),
                    )
                    .with_retrieval(retrieval)
                    .with_elapsed_ms(elapsed_ms);
                    self.record_side(side, &outcome, progress);
                    outcome
                })
            };
        let result_a = fill_missing(Side::A, result_a, &prompt_a, retrieval_a);
        let result_b = fill_missing(Side::B, result_b, &prompt_b, retrieval_b);

        let result = ComparisonResult::new(request.query, request.model, result_a, result_b)
            .with_elapsed_ms(elapsed_ms);

        info!(
            elapsed_ms,
            a_ok = result.result_a.is_success(),
            b_ok = result.result_b.is_success(),
            "Comparison complete"
        );
        self.logger.log(ComparisonEvent::new(
            "comparison_completed",
            serde_json::json!({
                "elapsed_ms": elapsed_ms,
                "both_succeeded": result.both_succeeded(),
                "cancelled": result.is_cancelled(),
            }),
        ));
        progress.on_comparison_complete(&result);

        Ok(result)
    }

    fn render(&self, request: &ComparisonRequest, side: Side) -> Result<RenderedPrompt, CompareError> {
        let technique = request.technique(side);
        RenderEngine::new(self.config.max_query_chars)
            .render(&self.catalog, technique, &request.query)
            .map_err(|source| {
                debug!(%side, technique, "Rendering failed: {}", source);
                CompareError::Render {
                    side,
                    technique: technique.to_string(),
                    source,
                }
            })
    }

    fn record_side(&self, side: Side, result: &SideResult, progress: &dyn ComparisonProgress) {
        match result.failure_kind() {
            None => info!(%side, technique = %result.technique, elapsed_ms = result.elapsed_ms, "Side succeeded"),
            Some(kind) => warn!(
                %side,
                technique = %result.technique,
                %kind,
                "Side failed: {}",
                result.error_message().unwrap_or_default()
            ),
        }

        self.logger.log(ComparisonEvent::new(
            "side_completed",
            serde_json::json!({
                "side": side.as_str(),
                "technique": result.technique,
                "success": result.is_success(),
                "error_kind": result.failure_kind().map(|k| k.as_str()),
                "elapsed_ms": result.elapsed_ms,
            }),
        ));
        progress.on_side_complete(side, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promptlab_domain::{Citation, Model, Technique};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    /// Echoes the prompt back, after an optional per-prompt delay.
    /// Prompts containing a failure marker return an error instead.
    #[derive(Default)]
    struct MockBackend {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        delays: HashMap<&'static str, Duration>,
        hang_on: Option<&'static str>,
        fail_on: Option<&'static str>,
    }

    impl MockBackend {
        fn with_delay(mut self, marker: &'static str, delay: Duration) -> Self {
            self.delays.insert(marker, delay);
            self
        }

        fn hanging_on(mut self, marker: &'static str) -> Self {
            self.hang_on = Some(marker);
            self
        }

        fn failing_on(mut self, marker: &'static str) -> Self {
            self.fail_on = Some(marker);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(&self, prompt: &str, _model: &Model) -> Result<Generation, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());

            if let Some(marker) = self.hang_on
                && prompt.contains(marker)
            {
                std::future::pending::<()>().await;
            }

            for (marker, delay) in &self.delays {
                if prompt.contains(marker) {
                    tokio::time::sleep(*delay).await;
                }
            }

            if let Some(marker) = self.fail_on
                && prompt.contains(marker)
            {
                return Err(BackendError::Throttled("quota exceeded".to_string()));
            }

            Ok(Generation::from_text(format!("echo: {}", prompt)))
        }
    }

    /// Knowledge-base stand-in: answers from the text it receives, with a citation.
    #[derive(Default)]
    struct RetrievalBackend {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GenerationBackend for RetrievalBackend {
        async fn generate(&self, prompt: &str, _model: &Model) -> Result<Generation, BackendError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Generation::from_text(format!("kb: {}", prompt))
                .with_citations(vec![Citation::new("s3://kb/case-1.md")]))
        }

        fn name(&self) -> &str {
            "kb"
        }

        fn uses_retrieval(&self) -> bool {
            true
        }
    }

    /// Answers the zero-shot prompt after firing the token; hangs on anything else.
    struct CancellingBackend {
        token: CancellationToken,
    }

    #[async_trait]
    impl GenerationBackend for CancellingBackend {
        async fn generate(&self, prompt: &str, _model: &Model) -> Result<Generation, BackendError> {
            if prompt.starts_with("Answer:") {
                self.token.cancel();
                return Ok(Generation::from_text("done"));
            }
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ComparisonLogger for RecordingLogger {
        fn log(&self, event: ComparisonEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ComparisonProgress for RecordingProgress {
        fn on_comparison_start(&self, _request: &ComparisonRequest) {
            self.events.lock().unwrap().push("start".to_string());
        }

        fn on_side_start(&self, side: Side, technique: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("dispatch {} {}", side, technique));
        }

        fn on_side_complete(&self, side: Side, result: &SideResult) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {} {}", side, result.is_success()));
        }

        fn on_comparison_complete(&self, _result: &ComparisonResult) {
            self.events.lock().unwrap().push("complete".to_string());
        }
    }

    fn catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();
        catalog.register_template("zero-shot", "Answer: {query}").unwrap();
        catalog
            .register_template("chain", "Let's think step by step.\nQuestion: {query}")
            .unwrap();
        catalog
            .register_technique(Technique::new("zs", "Zero-shot", "zero-shot"))
            .unwrap();
        catalog
            .register_technique(Technique::new("cot", "Chain-of-thought", "chain"))
            .unwrap();
        Arc::new(catalog.closed())
    }

    fn request(a: &str, b: &str) -> ComparisonRequest {
        ComparisonRequest::new("Lambda timeout", a, b, Model::Custom("m1".to_string()))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_echo_scenario_pairs_results_with_techniques() {
        let backend = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend.clone(), catalog());

        let result = use_case.execute(request("zs", "cot")).await.unwrap();

        let text_a = result.result_a.text().unwrap();
        let text_b = result.result_b.text().unwrap();
        assert!(text_a.contains("Answer: Lambda timeout"));
        assert!(text_b.contains("Let's think step by step.\nQuestion: Lambda timeout"));
        assert_ne!(text_a, text_b);
        assert_eq!(result.result_a.technique, "zs");
        assert_eq!(result.result_b.technique, "cot");
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_sides_run_concurrently() {
        let backend = Arc::new(
            MockBackend::default()
                .with_delay("Answer:", Duration::from_millis(200))
                .with_delay("step by step", Duration::from_millis(300)),
        );
        let use_case = CompareTechniquesUseCase::new(backend, catalog());

        let started = Instant::now();
        let result = use_case.execute(request("zs", "cot")).await.unwrap();
        let elapsed = started.elapsed();

        assert!(result.both_succeeded());
        assert!(elapsed >= Duration::from_millis(300), "{:?}", elapsed);
        // Sequential dispatch would take at least 500ms
        assert!(elapsed < Duration::from_millis(450), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn test_one_side_failing_keeps_the_other() {
        let backend = Arc::new(MockBackend::default().failing_on("step by step"));
        let use_case = CompareTechniquesUseCase::new(backend, catalog());

        let result = use_case.execute(request("zs", "cot")).await.unwrap();

        assert!(result.result_a.is_success());
        assert!(!result.result_b.is_success());
        assert_eq!(result.result_b.failure_kind(), Some(FailureKind::Throttled));
        assert_eq!(
            result.result_b.error_message(),
            Some("Throttled: quota exceeded")
        );
        assert!(result.analysis().is_none());
    }

    #[tokio::test]
    async fn test_same_technique_dispatches_twice() {
        let backend = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend.clone(), catalog());

        let result = use_case.execute(request("zs", "zs")).await.unwrap();

        assert_eq!(backend.calls(), 2);
        let prompts = backend.prompts.lock().unwrap().clone();
        assert_eq!(prompts, vec!["Answer: Lambda timeout", "Answer: Lambda timeout"]);
        assert_eq!(result.result_a.prompt, result.result_b.prompt);
        assert!(result.both_succeeded());
    }

    #[tokio::test]
    async fn test_render_failure_fails_fast() {
        let backend = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend.clone(), catalog());

        let err = use_case.execute(request("zs", "few-shot")).await.unwrap_err();

        assert!(matches!(err, CompareError::Render { side: Side::B, .. }));
        assert!(err.domain_error().is_not_found());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid() {
        let backend = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend.clone(), catalog());

        let err = use_case
            .execute(ComparisonRequest::new("", "zs", "cot", Model::default()))
            .await
            .unwrap_err();

        assert!(matches!(err.domain_error(), DomainError::InvalidQuery(_)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_limit_comes_from_config() {
        let backend = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend, catalog())
            .with_config(BehaviorConfig::default().with_max_query_chars(5));

        let err = use_case.execute(request("zs", "cot")).await.unwrap_err();
        assert!(matches!(
            err,
            CompareError::Render {
                side: Side::A,
                source: DomainError::InvalidQuery(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_timeout_marks_only_the_slow_side() {
        let backend = Arc::new(MockBackend::default().hanging_on("step by step"));
        let use_case = CompareTechniquesUseCase::new(backend, catalog()).with_config(
            BehaviorConfig::default().with_timeout(Some(Duration::from_millis(100))),
        );

        let started = Instant::now();
        let result = use_case.execute(request("zs", "cot")).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(result.result_a.is_success());
        assert_eq!(result.result_b.failure_kind(), Some(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn test_cancellation_returns_promptly() {
        let backend = Arc::new(MockBackend::default().hanging_on("Lambda"));
        let token = CancellationToken::new();
        let use_case = CompareTechniquesUseCase::new(backend, catalog())
            .with_config(BehaviorConfig::default().with_timeout(None))
            .with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let started = Instant::now();
        let result = use_case.execute(request("zs", "cot")).await.unwrap();
        canceller.await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(result.is_cancelled());
        assert_eq!(result.result_a.failure_kind(), Some(FailureKind::Cancelled));
        assert_eq!(result.result_b.failure_kind(), Some(FailureKind::Cancelled));
    }

    #[tokio::test]
    async fn test_cancellation_keeps_completed_side() {
        let backend = Arc::new(MockBackend::default().hanging_on("step by step"));
        let token = CancellationToken::new();
        let use_case = CompareTechniquesUseCase::new(backend, catalog())
            .with_config(BehaviorConfig::default().with_timeout(None))
            .with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            token.cancel();
        });

        let result = use_case.execute(request("zs", "cot")).await.unwrap();
        canceller.await.unwrap();

        assert!(result.result_a.is_success());
        assert_eq!(result.result_b.failure_kind(), Some(FailureKind::Cancelled));
    }

    #[tokio::test]
    async fn test_progress_and_log_events() {
        let backend = Arc::new(MockBackend::default());
        let logger = Arc::new(RecordingLogger::default());
        let progress = RecordingProgress::default();
        let use_case =
            CompareTechniquesUseCase::new(backend, catalog()).with_logger(logger.clone());

        use_case
            .execute_with_progress(request("zs", "cot"), &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first().map(String::as_str), Some("start"));
        assert_eq!(events.last().map(String::as_str), Some("complete"));
        assert!(events.contains(&"dispatch A zs".to_string()));
        assert!(events.contains(&"dispatch B cot".to_string()));
        assert!(events.contains(&"done A true".to_string()));
        assert!(events.contains(&"done B true".to_string()));

        let logged = logger.events.lock().unwrap().clone();
        assert_eq!(logged.len(), 4);
        assert_eq!(logged[0], "comparison_started");
        assert_eq!(logged[3], "comparison_completed");
        assert_eq!(
            logged.iter().filter(|e| **e == "side_completed").count(),
            2
        );
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let backend: Arc<dyn GenerationBackend> = Arc::new(MockBackend::default());
        let use_case = CompareTechniquesUseCase::new(backend, catalog());

        let result = use_case.execute(request("cot", "zs")).await.unwrap();
        assert!(result.both_succeeded());
        assert!(result.analysis().is_some());
    }

    #[tokio::test]
    async fn test_cancellation_keeps_side_finished_before_token_was_seen() {
        let token = CancellationToken::new();
        let backend = Arc::new(CancellingBackend {
            token: token.clone(),
        });
        let use_case = CompareTechniquesUseCase::new(backend, catalog())
            .with_config(BehaviorConfig::default().with_timeout(None))
            .with_cancellation(token);

        // Side A completes and cancels in the same poll, so the token is
        // already fired by the time the join loop wakes up
        let result = use_case.execute(request("zs", "cot")).await.unwrap();

        assert!(result.result_a.is_success());
        assert_eq!(result.result_a.text(), Some("done"));
        assert_eq!(result.result_b.failure_kind(), Some(FailureKind::Cancelled));
    }

    #[tokio::test]
    async fn test_side_backends_compare_direct_with_retrieval() {
        let direct = Arc::new(MockBackend::default());
        let retrieval = Arc::new(RetrievalBackend::default());
        let direct_port: Arc<dyn GenerationBackend> = direct.clone();
        let retrieval_port: Arc<dyn GenerationBackend> = retrieval.clone();
        let use_case = CompareTechniquesUseCase::new(direct_port, catalog())
            .with_side_backend(Side::B, retrieval_port);

        let result = use_case.execute(request("zs", "zs")).await.unwrap();

        // Direct side keeps the technique's rendering
        assert_eq!(direct.calls(), 1);
        assert_eq!(result.result_a.prompt, "Answer: Lambda timeout");
        assert!(!result.result_a.retrieval);

        // Knowledge-base side searches on the raw query
        let sent = retrieval.prompts.lock().unwrap().clone();
        assert_eq!(sent, vec!["Lambda timeout"]);
        assert_eq!(result.result_b.prompt, "Lambda timeout");
        assert_eq!(result.result_b.text(), Some("kb: Lambda timeout"));
        assert_eq!(result.result_b.citations().len(), 1);
        assert!(result.result_b.retrieval);
        assert_eq!(result.result_b.technique, "zs");
        assert!(result.analysis().is_some());
    }
}
