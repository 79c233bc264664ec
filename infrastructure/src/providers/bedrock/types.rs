//! Conversions between Bedrock SDK types and domain/application types

use aws_sdk_bedrockagentruntime::operation::retrieve_and_generate::RetrieveAndGenerateError;
use aws_sdk_bedrockagentruntime::types as agent;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types as runtime;
use promptlab_application::BackendError;
use promptlab_domain::Citation;

// ─── Bedrock → Domain ────────────────────────────────────────────

/// Concatenate the text blocks of a Converse output.
///
/// Returns `None` when the output carries no message.
pub fn converse_output_text(output: &runtime::ConverseOutput) -> Option<String> {
    match output {
        runtime::ConverseOutput::Message(message) => Some(
            message
                .content()
                .iter()
                .filter_map(|block| match block {
                    runtime::ContentBlock::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        ),
        _ => None,
    }
}

/// Flatten knowledge-base citations into one entry per retrieved reference.
///
/// The excerpt is the part of the generated answer that the reference supports.
/// References without a usable location are skipped; duplicate sources are kept
/// once, in first-seen order.
pub fn convert_citations(citations: &[agent::Citation]) -> Vec<Citation> {
    let mut converted: Vec<Citation> = Vec::new();

    for citation in citations {
        let excerpt = citation
            .generated_response_part()
            .and_then(|part| part.text_response_part())
            .and_then(|part| part.text())
            .map(str::trim)
            .filter(|text| !text.is_empty());

        for reference in citation.retrieved_references() {
            let Some(source) = reference.location().and_then(reference_source) else {
                continue;
            };
            if converted.iter().any(|c| c.source == source) {
                continue;
            }

            let mut entry = Citation::new(source);
            if let Some(text) = excerpt {
                entry = entry.with_excerpt(text);
            }
            converted.push(entry);
        }
    }

    converted
}

fn reference_source(location: &agent::RetrievalResultLocation) -> Option<String> {
    if let Some(uri) = location.s3_location().and_then(|s3| s3.uri()) {
        return Some(uri.to_string());
    }
    location
        .web_location()
        .and_then(|web| web.url())
        .map(str::to_string)
}

// ─── Errors ──────────────────────────────────────────────────────

/// Convert a Bedrock SDK error from the Converse call to a BackendError.
pub fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<ConverseError>,
) -> BackendError {
    match err {
        aws_sdk_bedrockruntime::error::SdkError::ServiceError(service_err) => {
            convert_converse_service_error(service_err.err())
        }
        aws_sdk_bedrockruntime::error::SdkError::TimeoutError(_) => BackendError::Timeout,
        other => BackendError::ConnectionError(format!("Bedrock SDK error: {}", other)),
    }
}

pub fn convert_converse_service_error(err: &ConverseError) -> BackendError {
    match err {
        ConverseError::ThrottlingException(e) => {
            BackendError::Throttled(format!("Bedrock throttled: {}", e))
        }
        ConverseError::ModelNotReadyException(e) => {
            BackendError::ModelNotAvailable(format!("Bedrock model not ready: {}", e))
        }
        ConverseError::ResourceNotFoundException(e) => {
            BackendError::ModelNotAvailable(format!("Bedrock model not found: {}", e))
        }
        ConverseError::AccessDeniedException(e) => {
            BackendError::ModelNotAvailable(format!("Bedrock access denied: {}", e))
        }
        ConverseError::ValidationException(e) => {
            BackendError::RequestFailed(format!("Bedrock validation error: {}", e))
        }
        ConverseError::ModelTimeoutException(_) => BackendError::Timeout,
        other => BackendError::RequestFailed(format!("Bedrock error: {:?}", other)),
    }
}

/// Convert a Bedrock Agent Runtime error from RetrieveAndGenerate to a BackendError.
pub fn convert_retrieve_error(
    err: &aws_sdk_bedrockagentruntime::error::SdkError<RetrieveAndGenerateError>,
) -> BackendError {
    match err {
        aws_sdk_bedrockagentruntime::error::SdkError::ServiceError(service_err) => {
            convert_retrieve_service_error(service_err.err())
        }
        aws_sdk_bedrockagentruntime::error::SdkError::TimeoutError(_) => BackendError::Timeout,
        other => BackendError::ConnectionError(format!("Bedrock Agent SDK error: {}", other)),
    }
}

pub fn convert_retrieve_service_error(err: &RetrieveAndGenerateError) -> BackendError {
    match err {
        RetrieveAndGenerateError::ThrottlingException(e) => {
            BackendError::Throttled(format!("Knowledge base throttled: {}", e))
        }
        RetrieveAndGenerateError::ServiceQuotaExceededException(e) => {
            BackendError::Throttled(format!("Knowledge base quota exceeded: {}", e))
        }
        RetrieveAndGenerateError::ResourceNotFoundException(e) => {
            BackendError::ModelNotAvailable(format!("Knowledge base or model not found: {}", e))
        }
        RetrieveAndGenerateError::AccessDeniedException(e) => {
            BackendError::ModelNotAvailable(format!("Knowledge base access denied: {}", e))
        }
        RetrieveAndGenerateError::ValidationException(e) => {
            BackendError::RequestFailed(format!("Knowledge base validation error: {}", e))
        }
        other => BackendError::RequestFailed(format!("Knowledge base error: {:?}", other)),
    }
}
