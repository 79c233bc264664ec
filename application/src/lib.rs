//! Application layer for promptlab
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    comparison_logger::{ComparisonEvent, ComparisonLogger, NoComparisonLogger},
    generation_backend::{BackendError, GenerationBackend},
    progress::{ComparisonProgress, NoProgress},
};
pub use use_cases::ask_technique::{AskInput, AskTechniqueUseCase};
pub use use_cases::compare_techniques::{CompareError, CompareTechniquesUseCase};
