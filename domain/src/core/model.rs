//! Model value object representing a generation backend model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generation models known by friendly name (Value Object)
///
/// Any identifier that is not a known friendly name is kept as
/// [`Model::Custom`] and handed to the backend unchanged, so a raw
/// provider model id (e.g. `anthropic.claude-3-haiku-20240307-v1:0`) works too.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Claude models
    ClaudeSonnet45,
    ClaudeHaiku45,
    ClaudeOpus41,
    ClaudeSonnet4,
    Claude37Sonnet,
    Claude35Sonnet,
    Claude3Haiku,
    // Amazon models
    NovaPro,
    NovaLite,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet45 => "claude-sonnet-4.5",
            Model::ClaudeHaiku45 => "claude-haiku-4.5",
            Model::ClaudeOpus41 => "claude-opus-4.1",
            Model::ClaudeSonnet4 => "claude-sonnet-4",
            Model::Claude37Sonnet => "claude-3.7-sonnet",
            Model::Claude35Sonnet => "claude-3.5-sonnet",
            Model::Claude3Haiku => "claude-3-haiku",
            Model::NovaPro => "nova-pro",
            Model::NovaLite => "nova-lite",
            Model::Custom(s) => s,
        }
    }

    /// Parse a model name, keeping unknown names as [`Model::Custom`]
    pub fn from_name(s: &str) -> Self {
        match s {
            "claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "claude-haiku-4.5" => Model::ClaudeHaiku45,
            "claude-opus-4.1" => Model::ClaudeOpus41,
            "claude-sonnet-4" => Model::ClaudeSonnet4,
            "claude-3.7-sonnet" => Model::Claude37Sonnet,
            "claude-3.5-sonnet" => Model::Claude35Sonnet,
            "claude-3-haiku" => Model::Claude3Haiku,
            "nova-pro" => Model::NovaPro,
            "nova-lite" => Model::NovaLite,
            other => Model::Custom(other.to_string()),
        }
    }

    /// All models known by friendly name
    pub fn known() -> Vec<Model> {
        vec![
            Model::ClaudeSonnet45,
            Model::ClaudeHaiku45,
            Model::ClaudeOpus41,
            Model::ClaudeSonnet4,
            Model::Claude37Sonnet,
            Model::Claude35Sonnet,
            Model::Claude3Haiku,
            Model::NovaPro,
            Model::NovaLite,
        ]
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        matches!(
            self,
            Model::ClaudeSonnet45
                | Model::ClaudeHaiku45
                | Model::ClaudeOpus41
                | Model::ClaudeSonnet4
                | Model::Claude37Sonnet
                | Model::Claude35Sonnet
                | Model::Claude3Haiku
        )
    }
}

impl Default for Model {
    /// Returns the default model (Claude Sonnet 4.5)
    fn default() -> Self {
        Model::ClaudeSonnet45
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_name(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_name(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_names_parse_back() {
        for model in Model::known() {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_raw_bedrock_id_is_custom() {
        let model: Model = "anthropic.claude-3-haiku-20240307-v1:0".parse().unwrap();
        assert_eq!(
            model,
            Model::Custom("anthropic.claude-3-haiku-20240307-v1:0".to_string())
        );
        assert_eq!(model.to_string(), "anthropic.claude-3-haiku-20240307-v1:0");
    }

    #[test]
    fn test_model_family_detection() {
        assert!(Model::Claude35Sonnet.is_claude());
        assert!(!Model::NovaPro.is_claude());
        assert!(!Model::Custom("x".to_string()).is_claude());
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::ClaudeHaiku45).unwrap();
        assert_eq!(json, "\"claude-haiku-4.5\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::ClaudeHaiku45);
    }
}
