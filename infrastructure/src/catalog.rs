//! Catalog assembly
//!
//! Builds the read-only [`Catalog`] shared by all requests: the built-in
//! techniques first, then the `[[templates]]` and `[[techniques]]` entries
//! from the config file, in file order.

use crate::config::FileConfig;
use promptlab_domain::{Catalog, DomainError, register_builtins};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while assembling the catalog from configuration
#[derive(Debug, Error)]
pub enum CatalogBuildError {
    #[error("built-in catalog is invalid: {0}")]
    Builtin(#[source] DomainError),

    #[error("config template '{id}' rejected: {source}")]
    Template {
        id: String,
        #[source]
        source: DomainError,
    },

    #[error("config technique '{id}' rejected: {source}")]
    Technique {
        id: String,
        #[source]
        source: DomainError,
    },
}

/// Build and close the catalog.
pub fn build_catalog(config: &FileConfig) -> Result<Arc<Catalog>, CatalogBuildError> {
    let mut catalog = Catalog::new();
    register_builtins(&mut catalog).map_err(CatalogBuildError::Builtin)?;

    for template in &config.templates {
        catalog
            .register_template(&template.id, &template.body)
            .map_err(|source| CatalogBuildError::Template {
                id: template.id.clone(),
                source,
            })?;
    }

    for entry in &config.techniques {
        catalog
            .register_technique(entry.to_technique())
            .map_err(|source| CatalogBuildError::Technique {
                id: entry.id.clone(),
                source,
            })?;
    }

    debug!(techniques = catalog.list().len(), "Catalog ready");
    Ok(Arc::new(catalog.closed()))
}
