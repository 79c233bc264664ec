//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Split into two families:
/// - configuration errors ([`InvalidTemplate`](DomainError::InvalidTemplate),
///   [`InvalidTechnique`](DomainError::InvalidTechnique),
///   [`RegistryClosed`](DomainError::RegistryClosed)) abort startup
/// - caller input errors ([`NotFound`](DomainError::NotFound),
///   [`InvalidQuery`](DomainError::InvalidQuery)) are returned to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error("Invalid technique '{id}': {reason}")]
    InvalidTechnique { id: String, reason: String },

    #[error("Registry is closed; registration is only allowed during initialization")]
    RegistryClosed,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    pub(crate) fn template_not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity: "Template",
            id: id.into(),
        }
    }

    pub(crate) fn technique_not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity: "Technique",
            id: id.into(),
        }
    }

    /// Check if this error belongs to the configuration family (fatal at startup)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTemplate { .. }
                | DomainError::InvalidTechnique { .. }
                | DomainError::RegistryClosed
        )
    }

    /// Check if this error is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_the_id() {
        let error = DomainError::technique_not_found("cot");
        assert_eq!(error.to_string(), "Technique not found: cot");
    }

    #[test]
    fn test_error_families() {
        assert!(DomainError::RegistryClosed.is_configuration());
        assert!(
            DomainError::InvalidTemplate {
                id: "t".to_string(),
                reason: "r".to_string()
            }
            .is_configuration()
        );
        assert!(!DomainError::InvalidQuery("empty".to_string()).is_configuration());
        assert!(DomainError::template_not_found("x").is_not_found());
        assert!(!DomainError::RegistryClosed.is_not_found());
    }
}
