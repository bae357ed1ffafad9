//! Cross-references between pattern documents.
//!
//! Builds a name → relation mapping in both directions so the CLI can show
//! which documents point at a pattern, not just which ones it points at.

use crate::catalog::PatternCatalog;
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Outgoing and incoming references for one pattern, each sorted.
pub struct RelationEntry {
    pub related: Vec<String>,
    pub referenced_by: Vec<String>,
}

/// Build a mapping of pattern name to its relations.
///
/// Every catalog entry gets a row, even with no links. References to names
/// that are not in the catalog are rejected.
pub fn build_relation_map(catalog: &PatternCatalog) -> Result<BTreeMap<String, RelationEntry>> {
    let mut map: BTreeMap<String, RelationEntry> = catalog
        .list()
        .into_iter()
        .map(|name| (name.0.clone(), RelationEntry::default()))
        .collect();

    for doc in catalog.documents() {
        for target in &doc.related {
            if !map.contains_key(&target.0) {
                return Err(anyhow!(
                    "{} references unknown pattern '{}'",
                    doc.name,
                    target
                ));
            }
            push_sorted(
                &mut map
                    .get_mut(&doc.name.0)
                    .ok_or_else(|| anyhow!("missing relation row for {}", doc.name))?
                    .related,
                &target.0,
            );
            push_sorted(
                &mut map
                    .get_mut(&target.0)
                    .ok_or_else(|| anyhow!("missing relation row for {target}"))?
                    .referenced_by,
                &doc.name.0,
            );
        }
    }

    Ok(map)
}

fn push_sorted(list: &mut Vec<String>, value: &str) {
    if let Err(pos) = list.binary_search_by(|existing| existing.as_str().cmp(value)) {
        list.insert(pos, value.to_string());
    }
}
