//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Region used when neither the config nor `AWS_REGION` names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS Bedrock settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region (falls back to `AWS_REGION`, then `us-east-1`)
    pub region: Option<String>,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Max tokens per response (default: 1024)
    pub max_tokens: u32,
    /// Use cross-region inference profile ids (`us.` prefix)
    pub cross_region: bool,
    /// Knowledge base for `--rag` (falls back to `KB_ID`)
    pub knowledge_base_id: Option<String>,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            max_tokens: 1024,
            cross_region: false,
            knowledge_base_id: None,
        }
    }
}

impl FileBedrockConfig {
    /// Effective region: config value, then `AWS_REGION`, then the default.
    pub fn resolved_region(&self) -> String {
        self.region
            .clone()
            .or_else(|| non_empty_env("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Effective knowledge base id: config value, then `KB_ID`.
    pub fn resolved_knowledge_base_id(&self) -> Option<String> {
        self.knowledge_base_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| non_empty_env("KB_ID"))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// AWS Bedrock settings.
    pub bedrock: FileBedrockConfig,
}
