//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod catalog;
mod compare;
mod output;
mod providers;

pub use behavior::FileBehaviorConfig;
pub use catalog::{FileTechniqueConfig, FileTemplateConfig};
pub use compare::FileCompareConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{DEFAULT_REGION, FileBedrockConfig, FileProvidersConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Narrowest column the side-by-side layout accepts
pub const MIN_OUTPUT_WIDTH: usize = 10;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("behavior.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("behavior.max_query_chars cannot be 0")]
    InvalidQueryLimit,

    #[error("compare.model cannot be empty")]
    EmptyModelName,

    #[error("compare.{field} cannot be empty")]
    EmptyTechnique { field: &'static str },

    #[error("output.width must be at least {min}, got {width}")]
    InvalidWidth { width: usize, min: usize },

    #[error("providers.bedrock.max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default model and technique pair
    pub compare: FileCompareConfig,
    /// Timeouts and limits
    pub behavior: FileBehaviorConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Backend settings
    pub providers: FileProvidersConfig,
    /// Extra templates registered after the built-ins
    pub templates: Vec<FileTemplateConfig>,
    /// Extra techniques registered after the built-ins
    pub techniques: Vec<FileTechniqueConfig>,
}

impl FileConfig {
    /// Validate the configuration
    ///
    /// Catalog entries are checked separately when the catalog is built.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.behavior.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.behavior.max_query_chars == 0 {
            return Err(ConfigValidationError::InvalidQueryLimit);
        }

        if self.compare.model.as_str().trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.compare.technique_a.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTechnique {
                field: "technique_a",
            });
        }
        if self.compare.technique_b.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTechnique {
                field: "technique_b",
            });
        }

        if self.output.width < MIN_OUTPUT_WIDTH {
            return Err(ConfigValidationError::InvalidWidth {
                width: self.output.width,
                min: MIN_OUTPUT_WIDTH,
            });
        }

        if self.providers.bedrock.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        Ok(())
    }
}
