//! Prompt templates and the write-once template store

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The single substitution slot every template body must contain.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// A named prompt pattern with exactly one query slot (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    id: String,
    body: String,
}

impl Template {
    /// Validate and create a template.
    ///
    /// Fails with [`DomainError::InvalidTemplate`] when the id is blank or the
    /// body does not contain [`QUERY_PLACEHOLDER`] exactly once.
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let body = body.into();

        if id.trim().is_empty() {
            return Err(DomainError::InvalidTemplate {
                id,
                reason: "template id cannot be empty".to_string(),
            });
        }

        match body.matches(QUERY_PLACEHOLDER).count() {
            1 => Ok(Self { id, body }),
            n => Err(DomainError::InvalidTemplate {
                id,
                reason: format!(
                    "body must contain {} exactly once, found {}",
                    QUERY_PLACEHOLDER, n
                ),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Substitute `query` into the slot, verbatim.
    pub fn fill(&self, query: &str) -> String {
        self.body.replacen(QUERY_PLACEHOLDER, query, 1)
    }
}

/// Write-once store of templates keyed by id
///
/// Templates can only be added while the store is open. There is no update
/// or delete; once [`close`](TemplateStore::close) is called every further
/// registration fails with [`DomainError::RegistryClosed`].
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
    closed: bool,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template body under `id`.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<(), DomainError> {
        if self.closed {
            return Err(DomainError::RegistryClosed);
        }

        let template = Template::new(id, body)?;
        if self.contains(template.id()) {
            return Err(DomainError::InvalidTemplate {
                id: template.id().to_string(),
                reason: "a template with this id is already registered".to_string(),
            });
        }

        self.templates.push(template);
        Ok(())
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Result<&Template, DomainError> {
        self.templates
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| DomainError::template_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// End the initialization phase.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
