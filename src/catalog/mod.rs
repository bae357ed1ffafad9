//! Pattern catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/patterns.json` so callers
//! can load a validated snapshot and look documents up by name. Types here
//! mirror the schema fields; callers use `PatternCatalog` for lookups.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, PatternCategory, PatternName};
pub use index::PatternCatalog;
pub use model::{CatalogFile, CatalogMetadata, CodeSample, PatternDocument, Scope, Section};

pub use model::{load_catalog_from_path, parse_catalog};
