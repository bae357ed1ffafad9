//! Deserializable representation of `catalog/patterns.json`.
//!
//! The types mirror the catalog schema so the store, renderers and tests can
//! reason about documents without ad-hoc JSON handling. Use `PatternCatalog`
//! for validation and lookup; use these structs when the raw file surface is
//! needed (scope, metadata).

use crate::catalog::identity::{CatalogKey, PatternCategory, PatternName};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full pattern catalog as stored on disk.
pub struct CatalogFile {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub scope: Scope,
    pub patterns: Vec<PatternDocument>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Identity of a catalog snapshot.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
/// Which categories the catalog declares, with a one-line description each.
pub struct Scope {
    #[serde(default)]
    pub description: Option<String>,
    pub categories: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// One pattern's reference document.
pub struct PatternDocument {
    pub name: PatternName,
    pub title: String,
    pub category: PatternCategory,
    pub summary: String,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<CodeSample>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<PatternName>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Heading plus prose body; order within a document is significant.
pub struct Section {
    pub heading: String,
    pub body: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Illustrative snippet attached to a document.
pub struct CodeSample {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub code: String,
}

impl PatternDocument {
    /// Find a section by heading, ignoring ASCII case.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.heading.eq_ignore_ascii_case(heading))
    }
}

/// Parse a catalog file from a JSON string without additional validation.
pub fn parse_catalog(data: &str) -> Result<CatalogFile> {
    let catalog: CatalogFile = serde_json::from_str(data)?;
    Ok(catalog)
}

/// Read and parse a catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogFile> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("parsing {}", path.display()))
}
