//! Shared library for the patternbook catalog.
//!
//! The crate exposes the pattern document model, the read-only catalog store,
//! renderers and relation helpers used by the `patternbook` binary. Public
//! functions here form the contract the binary depends on: repository
//! discovery, catalog source resolution, lookup and rendering.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod error;
pub mod relations;
pub mod render;
pub mod runtime;
pub mod validation;

mod schema_loader;

pub use catalog::{
    CatalogFile, CatalogKey, CatalogMetadata, CodeSample, PatternCatalog, PatternCategory,
    PatternDocument, PatternName, Section, load_catalog_from_path,
};
pub use error::CatalogError;
pub use relations::{RelationEntry, build_relation_map};
pub use render::{RenderError, RenderFormat, render_document, render_listing, render_section};
pub use runtime::{CatalogSource, load_catalog, resolve_catalog_source};
pub use validation::validate_documents;

/// Catalog location relative to the repository root.
pub const DEFAULT_CATALOG_RELATIVE: &str = "catalog/patterns.json";
const ROOT_SENTINEL: &str = "schema/pattern_catalog.schema.json";

/// Returns true when `candidate` looks like the repository root.
///
/// Both the catalog and its schema must be present; a stray `catalog/`
/// directory elsewhere on the path is not enough.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(DEFAULT_CATALOG_RELATIVE).is_file()
}

/// Verifies that an explicit `PATTERNBOOK_ROOT` hint points at a valid repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Honors `PATTERNBOOK_ROOT` if it points at a real checkout, then climbs up
/// from the current executable, then uses the build-time hint. Callers that
/// can run from the bundled catalog treat failure as non-fatal.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("PATTERNBOOK_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
        tracing::warn!(root = %env_root, "PATTERNBOOK_ROOT does not contain a catalog; ignoring");
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("PATTERNBOOK_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate patternbook repository root. Set PATTERNBOOK_ROOT to the checkout.");
}

/// Path of the default catalog under `repo_root`.
pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DEFAULT_CATALOG_RELATIVE)
}
