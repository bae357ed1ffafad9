//! Content checks for pattern documents.
//!
//! Returns every problem found rather than short-circuiting so `patternbook
//! validate` can report a whole catalog at once. `PatternCatalog::load` runs
//! the same checks and refuses to index a catalog with any finding.

use crate::catalog::{PatternDocument, PatternName};
use std::collections::BTreeSet;

pub fn validate_documents(
    documents: &[PatternDocument],
    declared_categories: Option<&BTreeSet<String>>,
) -> Vec<String> {
    let mut errors = Vec::new();
    let mut names: BTreeSet<&PatternName> = BTreeSet::new();
    for doc in documents {
        if !doc.name.is_well_formed() {
            errors.push(format!(
                "pattern name '{}' must be lowercase kebab-case",
                doc.name
            ));
        }
        if !names.insert(&doc.name) {
            errors.push(format!("duplicate pattern name {}", doc.name));
        }
    }

    for doc in documents {
        let name = &doc.name;
        if doc.title.trim().is_empty() {
            errors.push(format!("{name}: title must not be empty"));
        }
        if doc.summary.trim().is_empty() {
            errors.push(format!("{name}: summary must not be empty"));
        }
        if doc.sections.is_empty() {
            errors.push(format!("{name}: document has no sections"));
        }
        for (idx, section) in doc.sections.iter().enumerate() {
            if section.heading.trim().is_empty() {
                errors.push(format!("{name}: section {} has an empty heading", idx + 1));
            }
            if section.body.trim().is_empty() {
                errors.push(format!(
                    "{name}: section '{}' has an empty body",
                    section.heading.trim()
                ));
            }
        }
        for sample in &doc.samples {
            if sample.language.trim().is_empty() {
                errors.push(format!("{name}: code sample is missing a language"));
            }
            if sample.code.trim().is_empty() {
                errors.push(format!(
                    "{name}: {} code sample is empty",
                    sample.language.trim()
                ));
            }
        }
        if let Some(categories) = declared_categories {
            if !categories.contains(doc.category.as_str()) {
                errors.push(format!(
                    "{name}: references unknown category {}",
                    doc.category
                ));
            }
        }

        // Report each bad reference once even if it is listed twice.
        let mut seen = BTreeSet::new();
        for related in &doc.related {
            if !seen.insert(related) {
                continue;
            }
            if related == name {
                errors.push(format!("{name}: lists itself as related"));
            } else if !names.contains(related) {
                errors.push(format!("{name}: references unknown pattern '{related}'"));
            }
        }
    }
    errors
}
