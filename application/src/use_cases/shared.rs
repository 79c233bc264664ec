//! Helpers shared by the compare and ask use cases.

use crate::ports::generation_backend::{BackendError, GenerationBackend};
use promptlab_domain::{Generation, Model, RenderedPrompt, SideResult};
use std::time::{Duration, Instant};

/// One backend call, bounded by `timeout` when set.
pub(crate) async fn dispatch<B: GenerationBackend + ?Sized>(
    backend: &B,
    prompt: &str,
    model: &Model,
    timeout: Option<Duration>,
) -> (Result<Generation, BackendError>, Duration) {
    let started = Instant::now();
    let call = backend.generate(prompt, model);

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(BackendError::Timeout)),
        None => call.await,
    };

    (result, started.elapsed())
}

/// The prompt as a backend receives it.
///
/// Retrieval backends search on the text they are given, so they get the
/// query verbatim instead of the technique's rendering.
pub(crate) fn outgoing_prompt(
    prompt: RenderedPrompt,
    query: &str,
    retrieval: bool,
) -> RenderedPrompt {
    if retrieval {
        RenderedPrompt {
            text: query.to_string(),
            ..prompt
        }
    } else {
        prompt
    }
}

/// Convert a backend outcome into a tagged side result.
pub(crate) fn side_result(
    prompt: &RenderedPrompt,
    result: Result<Generation, BackendError>,
    elapsed: Duration,
    timeout: Option<Duration>,
) -> SideResult {
    let side = match result {
        Ok(generation) => SideResult::success(&prompt.technique_id, &prompt.text, generation),
        Err(BackendError::Timeout) => {
            let message = match timeout {
                Some(limit) => format!("no response within {}s", limit.as_secs_f64()),
                None => "backend reported a timeout".to_string(),
            };
            SideResult::failure(
                &prompt.technique_id,
                &prompt.text,
                BackendError::Timeout.kind(),
                message,
            )
        }
        Err(e) => SideResult::failure(&prompt.technique_id, &prompt.text, e.kind(), e.to_string()),
    };

    side.with_elapsed_ms(elapsed.as_millis() as u64)
}
