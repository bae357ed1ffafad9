//! Indexed, read-only view of a pattern catalog.
//!
//! Loading is all-or-nothing: the raw file is checked against the catalog
//! schema, the declared `schema_version` must match the schema's const, and
//! every document must pass `validate_documents` before anything is indexed.
//! After load the catalog is never mutated, so it can be shared freely across
//! threads.

use crate::catalog::{
    CatalogFile, CatalogKey, CatalogMetadata, PatternCategory, PatternDocument, PatternName,
    Scope, parse_catalog,
};
use crate::error::CatalogError;
use crate::schema_loader::{SchemaLoadResult, load_embedded_schema, load_json_schema};
use crate::validation::validate_documents;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SCHEMA_VERSION: &str = "pattern_catalog_v1";
const CATALOG_SCHEMA_RELATIVE: &str = "schema/pattern_catalog.schema.json";

const BUNDLED_CATALOG: &str = include_str!("../../catalog/patterns.json");
const BUNDLED_SCHEMA: &str = include_str!("../../schema/pattern_catalog.schema.json");

#[derive(Debug, Clone)]
/// Pattern documents keyed by name, plus the catalog identity they came from.
pub struct PatternCatalog {
    metadata: CatalogMetadata,
    scope: Scope,
    by_name: BTreeMap<PatternName, PatternDocument>,
}

impl PatternCatalog {
    /// Load and validate a catalog from disk.
    ///
    /// The schema is looked up next to the catalog (`<catalog>/../schema/`)
    /// before falling back to the copy compiled into the crate.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let schema = match resolve_catalog_schema_path(path) {
            Some(schema_path) => load_json_schema(&schema_path, Some(&allowed_schema_versions()))?,
            None => load_embedded_schema(BUNDLED_SCHEMA, Some(&allowed_schema_versions()))?,
        };
        Self::from_json(&data, &schema, &path.display().to_string())
            .with_context(|| format!("loading {}", path.display()))
    }

    /// The catalog shipped inside the crate.
    pub fn bundled() -> Result<Self> {
        let schema = load_embedded_schema(BUNDLED_SCHEMA, Some(&allowed_schema_versions()))
            .context("loading bundled catalog schema")?;
        Self::from_json(BUNDLED_CATALOG, &schema, "bundled catalog")
    }

    /// Build a catalog from already-parsed documents.
    ///
    /// Used at catalog-build time and by tests. Categories are not checked
    /// against a scope because none is declared.
    pub fn from_documents(
        metadata: CatalogMetadata,
        documents: impl IntoIterator<Item = PatternDocument>,
    ) -> Result<Self> {
        let documents: Vec<PatternDocument> = documents.into_iter().collect();
        let errors = validate_documents(&documents, None);
        if !errors.is_empty() {
            bail!("invalid pattern documents:\n{}", errors.join("\n"));
        }
        validate_catalog_metadata(&metadata)?;
        Ok(Self {
            metadata,
            scope: Scope::default(),
            by_name: index_documents(documents),
        })
    }

    fn from_json(data: &str, schema: &SchemaLoadResult, label: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing {label}"))?;
        schema.validate(&value, label)?;

        let file: CatalogFile = parse_catalog(data)?;
        validate_schema_version(&file.schema_version, &schema.schema_version)?;
        validate_catalog_metadata(&file.catalog)?;
        if file.patterns.is_empty() {
            bail!("{label} contains no patterns");
        }

        let declared: BTreeSet<String> = file.scope.categories.keys().cloned().collect();
        if declared.is_empty() {
            bail!("catalog scope must declare at least one category");
        }
        let errors = validate_documents(&file.patterns, Some(&declared));
        if !errors.is_empty() {
            bail!("{label} has invalid documents:\n{}", errors.join("\n"));
        }

        tracing::debug!(
            catalog = %file.catalog.key.0,
            patterns = file.patterns.len(),
            "indexed pattern catalog"
        );
        Ok(Self {
            metadata: file.catalog,
            scope: file.scope,
            by_name: index_documents(file.patterns),
        })
    }

    /// Fetch a document by name.
    pub fn get(&self, name: &str) -> Result<&PatternDocument, CatalogError> {
        self.by_name
            .get(&PatternName::from(name))
            .ok_or_else(|| CatalogError::not_found(name))
    }

    /// Every pattern name, sorted, without duplicates.
    pub fn list(&self) -> Vec<&PatternName> {
        self.by_name.keys().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&PatternName::from(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Documents in name order.
    pub fn documents(&self) -> impl Iterator<Item = &PatternDocument> {
        self.by_name.values()
    }

    /// Documents in `category`, in name order.
    pub fn by_category(&self, category: &PatternCategory) -> Vec<&PatternDocument> {
        self.documents()
            .filter(|doc| &doc.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, title, summary and
    /// section headings and bodies. Code samples are not searched.
    ///
    /// A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&PatternName> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.documents()
            .filter(|doc| document_mentions(doc, &needle))
            .map(|doc| &doc.name)
            .collect()
    }

    pub fn key(&self) -> &CatalogKey {
        &self.metadata.key
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Categories declared by the catalog file, with their descriptions.
    pub fn declared_categories(&self) -> &BTreeMap<String, String> {
        &self.scope.categories
    }
}

fn document_mentions(doc: &PatternDocument, needle: &str) -> bool {
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(doc.name.as_str())
        || hit(&doc.title)
        || hit(&doc.summary)
        || doc
            .sections
            .iter()
            .any(|section| hit(&section.heading) || hit(&section.body))
}

fn index_documents(documents: Vec<PatternDocument>) -> BTreeMap<PatternName, PatternDocument> {
    documents
        .into_iter()
        .map(|doc| (doc.name.clone(), doc))
        .collect()
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_SCHEMA_VERSION.to_string()])
}

fn validate_schema_version(declared: &str, expected: &str) -> Result<()> {
    if declared.is_empty() {
        bail!("schema_version must not be empty");
    }
    if declared != expected {
        bail!(
            "schema_version '{}' does not match catalog schema '{}'",
            declared,
            expected
        );
    }
    Ok(())
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    if meta.key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }
    if !meta
        .key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "catalog.key must match ^[A-Za-z0-9_.-]+$, got {}",
            meta.key.0
        );
    }
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    Ok(())
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> Option<PathBuf> {
    let base = catalog_path.parent().and_then(|p| p.parent())?;
    let candidate = base.join(CATALOG_SCHEMA_RELATIVE);
    candidate.is_file().then_some(candidate)
}
