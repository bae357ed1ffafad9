//! JSON Schema loading for catalog files.
//!
//! Reads a schema (from disk or an embedded string), checks its
//! `schema_version` const against the allowed set, and compiles a validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Where the schema stores the version it accepts.
pub(crate) const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

impl SchemaLoadResult {
    /// Validate `instance`, joining every schema violation into one error.
    pub fn validate(&self, instance: &Value, label: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{label} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    allowed_versions: Option<&BTreeSet<String>>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_schema(schema, allowed_versions)
        .with_context(|| format!("loading schema {}", path.display()))
}

pub(crate) fn load_embedded_schema(
    raw: &str,
    allowed_versions: Option<&BTreeSet<String>>,
) -> Result<SchemaLoadResult> {
    let schema: Value = serde_json::from_str(raw).context("parsing embedded schema")?;
    compile_schema(schema, allowed_versions)
}

fn compile_schema(
    schema: Value,
    allowed_versions: Option<&BTreeSet<String>>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(&schema, SCHEMA_VERSION_POINTER)
        .ok_or_else(|| anyhow!("schema missing schema_version const"))?;

    if let Some(allowed) = allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    let compiled =
        JSONSchema::compile(&schema).map_err(|err| anyhow!("compiling schema: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
