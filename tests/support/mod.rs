use anyhow::{Context, Result, bail};
use patternbook::find_repo_root;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const SCENARIO_NAMES: [&str; 6] = [
    "adapter",
    "decorator",
    "facade",
    "mediator",
    "object-pool",
    "private-class-data",
];

pub fn repo_root() -> PathBuf {
    find_repo_root().expect("tests require repository root")
}

pub fn patternbook_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_patternbook"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Minimal valid document for `name`.
pub fn pattern_json(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "title": title_case(name),
        "category": category,
        "summary": format!("Fixture summary for {name}."),
        "sections": [
            {"heading": "Intent", "body": format!("Why {name} exists.")},
            {"heading": "Structure", "body": format!("How {name} is wired.")}
        ]
    })
}

pub fn catalog_json(patterns: Vec<Value>) -> Value {
    json!({
        "schema_version": "pattern_catalog_v1",
        "catalog": {"key": "fixture_catalog_v1", "title": "Fixture catalog"},
        "scope": {
            "categories": {
                "structural": "composition",
                "behavioral": "communication",
                "creational": "construction"
            }
        },
        "patterns": patterns
    })
}

/// The six-pattern catalog used by the lookup scenarios.
pub fn scenario_catalog() -> Value {
    let patterns = SCENARIO_NAMES
        .iter()
        .map(|name| {
            let category = match *name {
                "mediator" => "behavioral",
                "object-pool" => "creational",
                _ => "structural",
            };
            pattern_json(name, category)
        })
        .collect();
    catalog_json(patterns)
}

/// Write `catalog` to `<dir>/catalog/patterns.json` and return the path.
pub fn write_catalog(dir: &TempDir, catalog: &Value) -> Result<PathBuf> {
    let catalog_dir = dir.path().join("catalog");
    std::fs::create_dir_all(&catalog_dir)?;
    let path = catalog_dir.join("patterns.json");
    std::fs::write(&path, serde_json::to_vec_pretty(catalog)?)?;
    Ok(path)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn catalog_arg(path: &Path) -> [String; 2] {
    ["--catalog".to_string(), path.display().to_string()]
}

fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
