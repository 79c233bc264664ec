//! Configuration file loading for promptlab
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./promptlab.toml` or `./.promptlab.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/promptlab/config.toml`
//! 4. Environment: `PROMPTLAB_*` (nested with `__`, e.g. `PROMPTLAB_BEHAVIOR__TIMEOUT_SECONDS`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_REGION, FileBedrockConfig, FileBehaviorConfig,
    FileCompareConfig, FileConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
    FileTechniqueConfig, FileTemplateConfig, MIN_OUTPUT_WIDTH,
};
pub use loader::ConfigLoader;
