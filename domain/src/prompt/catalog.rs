//! Technique catalog: template store and technique registry behind one
//! initialization phase.
//!
//! A [`Catalog`] is populated once at startup, then [`closed`](Catalog::close)
//! and shared read-only (typically as `Arc<Catalog>`) by every request.

use crate::core::error::DomainError;
use crate::prompt::template::{Template, TemplateStore};
use crate::prompt::technique::{Technique, TechniqueRegistry};

#[derive(Debug, Default)]
pub struct Catalog {
    templates: TemplateStore,
    techniques: TechniqueRegistry,
}

impl Catalog {
    /// Create an empty, open catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_template(
        &mut self,
        id: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.templates.register(id, body)
    }

    pub fn register_technique(&mut self, technique: Technique) -> Result<(), DomainError> {
        self.techniques.register(technique, &self.templates)
    }

    /// End the initialization phase for both the store and the registry.
    pub fn close(&mut self) {
        self.templates.close();
        self.techniques.close();
    }

    /// Close and return the catalog, for builder-style construction.
    pub fn closed(mut self) -> Self {
        self.close();
        self
    }

    pub fn is_closed(&self) -> bool {
        self.techniques.is_closed()
    }

    pub fn template(&self, id: &str) -> Result<&Template, DomainError> {
        self.templates.get(id)
    }

    pub fn technique(&self, id: &str) -> Result<&Technique, DomainError> {
        self.techniques.get(id)
    }

    /// Resolve a technique and its template in one lookup.
    pub fn resolve(&self, technique_id: &str) -> Result<(&Technique, &Template), DomainError> {
        let technique = self.techniques.get(technique_id)?;
        let template = self.templates.get(&technique.template_id)?;
        Ok((technique, template))
    }

    /// All techniques in registration order.
    pub fn list(&self) -> &[Technique] {
        self.techniques.list()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }
}
