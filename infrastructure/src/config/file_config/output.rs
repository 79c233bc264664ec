//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileOutputFormat {
    /// Two wrapped columns with headers
    #[default]
    SideBySide,
    /// Machine-readable JSON
    Json,
    /// One section per side, no columns
    Plain,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (overridden by `--output`)
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Column width for side-by-side output
    pub width: usize,
    /// Print the response analysis after a comparison
    pub analysis: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            width: 45,
            analysis: true,
        }
    }
}
