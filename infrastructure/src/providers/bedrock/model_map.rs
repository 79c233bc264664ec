//! Bedrock model ID mapping
//!
//! Maps domain `Model` variants to Bedrock model identifiers,
//! with optional cross-region inference prefix.

use promptlab_domain::Model;

/// Base Bedrock model id, without any inference profile prefix.
///
/// Custom models are passed through unchanged.
pub fn base_model_id(model: &Model) -> &str {
    match model {
        Model::ClaudeSonnet45 => "anthropic.claude-sonnet-4-5-20250929-v1:0",
        Model::ClaudeHaiku45 => "anthropic.claude-haiku-4-5-20251001-v1:0",
        Model::ClaudeOpus41 => "anthropic.claude-opus-4-1-20250805-v1:0",
        Model::ClaudeSonnet4 => "anthropic.claude-sonnet-4-20250514-v1:0",
        Model::Claude37Sonnet => "anthropic.claude-3-7-sonnet-20250219-v1:0",
        Model::Claude35Sonnet => "anthropic.claude-3-5-sonnet-20240620-v1:0",
        Model::Claude3Haiku => "anthropic.claude-3-haiku-20240307-v1:0",
        Model::NovaPro => "amazon.nova-pro-v1:0",
        Model::NovaLite => "amazon.nova-lite-v1:0",
        Model::Custom(id) => id,
    }
}

/// Convert a domain Model to the id passed to the Converse API.
///
/// - Models that require inference profiles always use the region-group
///   prefix (`us.`, `eu.`, etc.) regardless of `cross_region`.
/// - When `cross_region` is true, other known models get the same prefix.
/// - Custom ids are never prefixed (the caller manages the full id).
pub fn to_bedrock_model_id(model: &Model, cross_region: bool, region: &str) -> String {
    let base_id = base_model_id(model);

    if matches!(model, Model::Custom(_)) {
        return base_id.to_string();
    }

    if cross_region || requires_inference_profile(model) {
        let prefix = inference_profile_prefix(region);
        format!("{prefix}.{base_id}")
    } else {
        base_id.to_string()
    }
}

/// Foundation model ARN used by knowledge-base queries.
///
/// RetrieveAndGenerate wants the foundation model itself, so no inference
/// profile prefix is applied.
pub fn foundation_model_arn(model: &Model, region: &str) -> String {
    let model_id = base_model_id(model);
    if model_id.starts_with("arn:") {
        return model_id.to_string();
    }
    format!("arn:aws:bedrock:{region}::foundation-model/{model_id}")
}

/// Whether a model requires an inference profile (cannot use on-demand throughput).
fn requires_inference_profile(model: &Model) -> bool {
    matches!(
        model,
        Model::ClaudeSonnet45
            | Model::ClaudeHaiku45
            | Model::ClaudeOpus41
            | Model::ClaudeSonnet4
            | Model::Claude37Sonnet
    )
}

/// Derive the inference profile region group from an AWS region string.
///
/// Cross-region inference profiles use continent-level prefixes:
/// `us-east-1` → `us`, `eu-west-1` → `eu`, `ap-northeast-1` → `apac`, etc.
fn inference_profile_prefix(region: &str) -> &str {
    match region.split('-').next() {
        Some("ap") => "apac",
        Some(prefix @ ("us" | "eu" | "ca" | "sa" | "me" | "af")) => prefix,
        _ => "us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude35_sonnet_is_on_demand() {
        let id = to_bedrock_model_id(&Model::Claude35Sonnet, false, "us-east-1");
        assert_eq!(id, "anthropic.claude-3-5-sonnet-20240620-v1:0");
    }

    #[test]
    fn test_claude_sonnet45_uses_inference_profile() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet45, false, "us-east-1");
        assert_eq!(id, "us.anthropic.claude-sonnet-4-5-20250929-v1:0");
    }

    #[test]
    fn test_inference_profile_follows_region_group() {
        let id = to_bedrock_model_id(&Model::ClaudeHaiku45, false, "eu-west-1");
        assert_eq!(id, "eu.anthropic.claude-haiku-4-5-20251001-v1:0");

        let id = to_bedrock_model_id(&Model::Claude37Sonnet, false, "ap-northeast-1");
        assert_eq!(id, "apac.anthropic.claude-3-7-sonnet-20250219-v1:0");
    }

    #[test]
    fn test_cross_region_prefix() {
        let id = to_bedrock_model_id(&Model::Claude3Haiku, true, "us-west-2");
        assert_eq!(id, "us.anthropic.claude-3-haiku-20240307-v1:0");
    }

    #[test]
    fn test_nova_mapping() {
        assert_eq!(
            to_bedrock_model_id(&Model::NovaLite, false, "us-east-1"),
            "amazon.nova-lite-v1:0"
        );
    }

    #[test]
    fn test_custom_model_ignores_cross_region() {
        let model = Model::Custom("my-model".to_string());
        assert_eq!(to_bedrock_model_id(&model, true, "us-west-2"), "my-model");
    }

    #[test]
    fn test_foundation_model_arn() {
        assert_eq!(
            foundation_model_arn(&Model::Claude35Sonnet, "us-east-1"),
            "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-5-sonnet-20240620-v1:0"
        );
    }

    #[test]
    fn test_foundation_model_arn_keeps_full_arn() {
        let arn = "arn:aws:bedrock:us-east-1:123456789012:inference-profile/us.x";
        let model = Model::Custom(arn.to_string());
        assert_eq!(foundation_model_arn(&model, "eu-west-1"), arn);
    }

    #[test]
    fn test_every_known_model_maps() {
        for model in Model::known() {
            assert!(base_model_id(&model).contains('.'), "{}", model);
        }
    }
}
