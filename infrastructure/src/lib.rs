//! Infrastructure layer for promptlab
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, configuration file loading and
//! catalog assembly.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use catalog::{CatalogBuildError, build_catalog};
pub use config::{
    ConfigLoader, ConfigValidationError, FileBedrockConfig, FileConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use logging::JsonlComparisonLogger;
pub use providers::EchoBackend;

#[cfg(feature = "bedrock")]
pub use providers::bedrock::{BedrockBackend, GenerationMode};
