//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_technique;
pub mod compare_techniques;
pub(crate) mod shared;
