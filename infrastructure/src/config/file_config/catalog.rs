//! Extra catalog entries from TOML (`[[templates]]` and `[[techniques]]`)

use promptlab_domain::Technique;
use serde::{Deserialize, Serialize};

/// A template declared in the config file
///
/// ```toml
/// [[templates]]
/// id = "tpl-bullets"
/// body = "Answer in three bullet points: {query}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTemplateConfig {
    pub id: String,
    pub body: String,
}

/// A technique declared in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTechniqueConfig {
    pub id: String,
    /// Falls back to `id` when omitted
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub usage_guidance: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    pub template_id: String,
}

impl FileTechniqueConfig {
    pub fn to_technique(&self) -> Technique {
        let display_name = self.display_name.as_deref().unwrap_or(&self.id);
        Technique::new(&self.id, display_name, &self.template_id)
            .with_description(&self.description)
            .with_guidance(self.usage_guidance.iter().cloned())
            .with_limitations(self.limitations.iter().cloned())
    }
}
