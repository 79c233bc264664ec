//! Comparison defaults from TOML (`[compare]` section)

use promptlab_domain::Model;
use serde::{Deserialize, Serialize};

/// Defaults used when `compare` is run without `-a`, `-b` or `-m`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompareConfig {
    /// Model both sides are sent to
    pub model: Model,
    /// Technique for side A
    pub technique_a: String,
    /// Technique for side B
    pub technique_b: String,
}

impl Default for FileCompareConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            technique_a: "default".to_string(),
            technique_b: "cot".to_string(),
        }
    }
}
