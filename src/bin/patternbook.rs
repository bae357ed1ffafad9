//! Command-line front end for the pattern catalog.
//!
//! Resolves a catalog (flag, `PATTERNBOOK_CATALOG`, repository checkout, or
//! the bundled copy), then lists, shows, searches, or validates documents.
//! Output goes to stdout; diagnostics and logs go to stderr.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use patternbook::render::{render_relations, render_section};
use patternbook::{
    CatalogSource, PatternCatalog, PatternCategory, RenderFormat, build_relation_map,
    load_catalog, load_catalog_from_path, render_document, render_listing,
    resolve_catalog_source, validate_documents,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PATTERNBOOK_LOG";

#[derive(Parser)]
#[command(name = "patternbook", version, about = "Browse design-pattern reference documents")]
struct Cli {
    /// Catalog JSON to read instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pattern names
    List {
        /// Only show patterns in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Print one pattern document
    Show {
        name: String,
        #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,
        /// Print only the section with this heading (case-insensitive)
        #[arg(long, value_name = "HEADING")]
        section: Option<String>,
    },
    /// Find patterns mentioning a term
    Search { term: String },
    /// Show cross-references between patterns
    Relations { name: Option<String> },
    /// Check a catalog file and report every problem
    Validate { path: Option<PathBuf> },
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let explicit = cli.catalog.as_deref();

    let mut output = String::new();
    match &cli.command {
        Command::List { category } => {
            let catalog = open_catalog(explicit)?;
            let docs: Vec<_> = match category {
                Some(raw) => {
                    let category = PatternCategory::parse(raw.trim());
                    catalog.by_category(&category)
                }
                None => catalog.documents().collect(),
            };
            render_listing(docs, &mut output)?;
        }
        Command::Show {
            name,
            format,
            section,
        } => {
            let catalog = open_catalog(explicit)?;
            let doc = catalog.get(name)?;
            match section {
                Some(heading) => {
                    let section = doc.section(heading.trim()).ok_or_else(|| {
                        anyhow!("pattern {} has no section '{}'", doc.name, heading.trim())
                    })?;
                    render_section(section, *format, &mut output)?;
                }
                None => render_document(doc, *format, &mut output)?,
            }
        }
        Command::Search { term } => {
            let catalog = open_catalog(explicit)?;
            let hits = catalog.search(term);
            if hits.is_empty() {
                bail!("no pattern mentions '{}'", term.trim());
            }
            let docs = hits
                .into_iter()
                .map(|name| catalog.get(name.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            render_listing(docs, &mut output)?;
        }
        Command::Relations { name } => {
            let catalog = open_catalog(explicit)?;
            let mut relations = build_relation_map(&catalog)?;
            if let Some(name) = name {
                catalog.get(name)?;
                relations.retain(|key, _| key == name);
            }
            render_relations(&catalog, &relations, &mut output)?;
        }
        Command::Validate { path } => return validate(path.as_deref().or(explicit)),
    }

    print!("{output}");
    Ok(())
}

fn open_catalog(explicit: Option<&Path>) -> Result<PatternCatalog> {
    let source = resolve_catalog_source(explicit)?;
    let catalog =
        load_catalog(&source).with_context(|| format!("loading catalog from {source}"))?;
    tracing::info!(%source, patterns = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Report every content problem in a catalog file, then run the full loader.
fn validate(path: Option<&Path>) -> Result<()> {
    let source = match path {
        Some(path) => CatalogSource::Path(path.to_path_buf()),
        None => resolve_catalog_source(None)?,
    };

    if let CatalogSource::Path(path) = &source {
        let file = load_catalog_from_path(path)?;
        let declared: BTreeSet<String> = file.scope.categories.keys().cloned().collect();
        let errors = validate_documents(&file.patterns, Some(&declared));
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("{}: {error}", path.display());
            }
            return Err(anyhow!(
                "{} problem(s) found in {}",
                errors.len(),
                path.display()
            ));
        }
    }

    let catalog: PatternCatalog = load_catalog(&source)?;
    let metadata = catalog.metadata();
    println!(
        "{}: ok ({} patterns, catalog {} \"{}\")",
        source,
        catalog.len(),
        metadata.key.0,
        metadata.title
    );
    Ok(())
}
