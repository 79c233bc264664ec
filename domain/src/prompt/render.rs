//! Render engine: technique id + query → final prompt text

use crate::core::error::DomainError;
use crate::core::query::{DEFAULT_MAX_QUERY_CHARS, Query};
use crate::prompt::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// A fully rendered prompt, ready for the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPrompt {
    pub technique_id: String,
    pub template_id: String,
    pub text: String,
}

/// Substitutes a validated query into a technique's template.
///
/// Rendering is pure: it only reads the catalog. The query is inserted
/// verbatim; sanitization is the backend's concern.
#[derive(Debug, Clone, Copy)]
pub struct RenderEngine {
    max_query_chars: usize,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_CHARS)
    }
}

impl RenderEngine {
    pub fn new(max_query_chars: usize) -> Self {
        Self { max_query_chars }
    }

    pub fn max_query_chars(&self) -> usize {
        self.max_query_chars
    }

    /// Render `query` with the technique registered as `technique_id`.
    ///
    /// # Errors
    /// - [`DomainError::NotFound`] if the technique or its template is missing
    /// - [`DomainError::InvalidQuery`] if the query is empty or too long
    pub fn render(
        &self,
        catalog: &Catalog,
        technique_id: &str,
        query: &str,
    ) -> Result<RenderedPrompt, DomainError> {
        let (technique, template) = catalog.resolve(technique_id)?;
        let query = Query::parse(query, self.max_query_chars)?;

        Ok(RenderedPrompt {
            technique_id: technique.id.clone(),
            template_id: template.id().to_string(),
            text: template.fill(query.content()),
        })
    }
}
