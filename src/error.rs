//! Typed lookup failure for the catalog store.
//!
//! Loading and validation report through `anyhow` with file context; lookups
//! against an already loaded catalog have exactly one way to fail.

use crate::catalog::PatternName;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("pattern not found: {name}")]
    NotFound { name: PatternName },
}

impl CatalogError {
    pub fn not_found(name: impl Into<String>) -> Self {
        CatalogError::NotFound {
            name: PatternName(name.into()),
        }
    }
}
