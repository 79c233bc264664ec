//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: generation models addressed by friendly name
//! - [`query::Query`]: a validated user query
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod query;
pub mod string;
