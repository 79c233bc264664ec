//! Prompt domain
//!
//! Templates, techniques and the render engine that turns a technique id
//! plus a user query into the prompt sent to the backend.
//!
//! - [`TemplateStore`]: write-once templates with a single `{query}` slot
//! - [`TechniqueRegistry`]: technique metadata in registration order
//! - [`Catalog`]: both of the above behind one initialization phase
//! - [`RenderEngine`]: validated single-slot substitution

pub mod builtin;
mod catalog;
mod render;
mod technique;
mod template;

pub use builtin::register_builtins;
pub use catalog::Catalog;
pub use render::{RenderEngine, RenderedPrompt};
pub use technique::{Technique, TechniqueRegistry};
pub use template::{QUERY_PLACEHOLDER, Template, TemplateStore};
