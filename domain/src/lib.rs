//! Domain layer for promptlab
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Technique
//!
//! A named prompt-construction strategy (zero-shot, few-shot,
//! chain-of-thought, role prompting) bound to exactly one template.
//!
//! ## Comparison
//!
//! Two techniques rendered with the same query and sent to the same model,
//! so their answers can be read side by side.

pub mod comparison;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use comparison::{
    Citation, ComparisonRequest, ComparisonResult, FailureKind, Generation, ResponseAnalysis,
    Side, SideOutcome, SideResult, Verdict, analyze,
};
pub use core::{
    error::DomainError,
    model::Model,
    query::{DEFAULT_MAX_QUERY_CHARS, Query},
};
pub use prompt::{
    Catalog, QUERY_PLACEHOLDER, RenderEngine, RenderedPrompt, Technique, TechniqueRegistry,
    Template, TemplateStore, register_builtins,
};
