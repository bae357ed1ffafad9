//! Catalog source resolution shared by the binary and tests.
//!
//! Centralizes where a catalog comes from so every entry point follows the
//! same order: explicit path, `PATTERNBOOK_CATALOG`, the repository's
//! `catalog/patterns.json`, then the copy compiled into the crate.

use crate::catalog::PatternCatalog;
use crate::{default_catalog_path, find_repo_root};
use anyhow::{Result, bail};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CATALOG_ENV: &str = "PATTERNBOOK_CATALOG";

/// Where a catalog will be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Bundled,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
            CatalogSource::Bundled => f.write_str("<bundled>"),
        }
    }
}

/// Pick the catalog source.
///
/// An explicit path or a non-empty `PATTERNBOOK_CATALOG` must exist; a
/// missing repository catalog silently falls back to the bundled one.
pub fn resolve_catalog_source(explicit: Option<&Path>) -> Result<CatalogSource> {
    let env_value = env::var(CATALOG_ENV).ok();
    choose_source(explicit, env_value.as_deref(), || {
        find_repo_root()
            .ok()
            .map(|root| default_catalog_path(&root))
    })
}

fn choose_source(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    repo_catalog: impl FnOnce() -> Option<PathBuf>,
) -> Result<CatalogSource> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("catalog not found: {}", path.display());
        }
        return Ok(CatalogSource::Path(path.to_path_buf()));
    }

    if let Some(raw) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(raw);
        if !path.is_file() {
            bail!("{CATALOG_ENV} points at a missing file: {}", path.display());
        }
        return Ok(CatalogSource::Path(path));
    }

    match repo_catalog() {
        Some(path) if path.is_file() => Ok(CatalogSource::Path(path)),
        _ => Ok(CatalogSource::Bundled),
    }
}

/// Load and validate the catalog behind `source`.
pub fn load_catalog(source: &CatalogSource) -> Result<PatternCatalog> {
    tracing::debug!(%source, "loading pattern catalog");
    match source {
        CatalogSource::Path(path) => PatternCatalog::load(path),
        CatalogSource::Bundled => PatternCatalog::bundled(),
    }
}
