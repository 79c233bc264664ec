//! Prompt techniques and the technique registry

use crate::core::error::DomainError;
use crate::prompt::template::TemplateStore;
use serde::{Deserialize, Serialize};

/// A named prompt-construction strategy bound to exactly one template (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technique {
    /// Lookup key, independent of the template id namespace
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// When to use this technique, in display order
    #[serde(default)]
    pub usage_guidance: Vec<String>,
    /// Known weaknesses, in display order
    #[serde(default)]
    pub limitations: Vec<String>,
    /// Id of the template in the [`TemplateStore`]
    pub template_id: String,
}

impl Technique {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            usage_guidance: Vec::new(),
            limitations: Vec::new(),
            template_id: template_id.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_guidance<I, S>(mut self, guidance: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.usage_guidance = guidance.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limitations<I, S>(mut self, limitations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.limitations = limitations.into_iter().map(Into::into).collect();
        self
    }
}

/// Registry of techniques, preserving registration order
///
/// Techniques are validated against a [`TemplateStore`] on registration.
/// After [`close`](TechniqueRegistry::close) the registry is read-only.
#[derive(Debug, Default)]
pub struct TechniqueRegistry {
    techniques: Vec<Technique>,
    closed: bool,
}

impl TechniqueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a technique whose template must already exist in `templates`.
    pub fn register(
        &mut self,
        technique: Technique,
        templates: &TemplateStore,
    ) -> Result<(), DomainError> {
        if self.closed {
            return Err(DomainError::RegistryClosed);
        }

        if technique.id.trim().is_empty() {
            return Err(DomainError::InvalidTechnique {
                id: technique.id,
                reason: "technique id cannot be empty".to_string(),
            });
        }

        if self.techniques.iter().any(|t| t.id == technique.id) {
            return Err(DomainError::InvalidTechnique {
                id: technique.id,
                reason: "a technique with this id is already registered".to_string(),
            });
        }

        if !templates.contains(&technique.template_id) {
            return Err(DomainError::InvalidTechnique {
                reason: format!("unknown template '{}'", technique.template_id),
                id: technique.id,
            });
        }

        self.techniques.push(technique);
        Ok(())
    }

    /// Look up a technique by id.
    pub fn get(&self, id: &str) -> Result<&Technique, DomainError> {
        self.techniques
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::technique_not_found(id))
    }

    /// All techniques in registration order.
    pub fn list(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
