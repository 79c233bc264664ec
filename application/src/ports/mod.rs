//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters must implement.

pub mod comparison_logger;
pub mod generation_backend;
pub mod progress;
