//! Text renderers for pattern documents.
//!
//! Everything writes into `fmt::Write` so the CLI can buffer output and tests
//! can render straight into a `String`. Content is printed verbatim; only the
//! framing (headings, indentation, fences) differs between formats.

use crate::catalog::{PatternCatalog, PatternDocument, Section};
use crate::relations::RelationEntry;
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Output format understood by `render_document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("writing output: {0}")]
    Write(fmt::Error),
    #[error("serializing document: {0}")]
    Serialize(serde_json::Error),
}

pub fn render_document<W: fmt::Write>(
    doc: &PatternDocument,
    format: RenderFormat,
    writer: &mut W,
) -> Result<(), RenderError> {
    match format {
        RenderFormat::Text => render_text(doc, writer).map_err(RenderError::Write),
        RenderFormat::Markdown => render_markdown(doc, writer).map_err(RenderError::Write),
        RenderFormat::Json => {
            let json = serde_json::to_string_pretty(doc).map_err(RenderError::Serialize)?;
            writeln!(writer, "{json}").map_err(RenderError::Write)
        }
    }
}

/// Render a single section of a document.
pub fn render_section<W: fmt::Write>(
    section: &Section,
    format: RenderFormat,
    writer: &mut W,
) -> Result<(), RenderError> {
    match format {
        RenderFormat::Text => write_text_section(section, writer).map_err(RenderError::Write),
        RenderFormat::Markdown => {
            write_markdown_section(section, writer).map_err(RenderError::Write)
        }
        RenderFormat::Json => {
            let json = serde_json::to_string_pretty(section).map_err(RenderError::Serialize)?;
            writeln!(writer, "{json}").map_err(RenderError::Write)
        }
    }
}

pub fn render_text(doc: &PatternDocument, writer: &mut impl fmt::Write) -> fmt::Result {
    let header = format!("{} ({})", doc.title, doc.category);
    writeln!(writer, "{header}")?;
    writeln!(writer, "{}", "=".repeat(header.chars().count()))?;
    write_block(writer, &doc.summary)?;

    for section in &doc.sections {
        writeln!(writer)?;
        write_text_section(section, writer)?;
    }

    for sample in &doc.samples {
        writeln!(writer)?;
        match sample.caption.as_deref().map(str::trim) {
            Some(caption) if !caption.is_empty() => {
                writeln!(writer, "[{}] {}", sample.language, caption)?
            }
            _ => writeln!(writer, "[{}]", sample.language)?,
        }
        write_indented(writer, &sample.code, "    ")?;
    }

    if !doc.related.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "related: {}", join_names(doc))?;
    }
    Ok(())
}

pub fn render_markdown(doc: &PatternDocument, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "# {}", doc.title)?;
    writeln!(writer)?;
    writeln!(writer, "*Category: {}*", doc.category)?;
    writeln!(writer)?;
    write_block(writer, &doc.summary)?;

    for section in &doc.sections {
        writeln!(writer)?;
        write_markdown_section(section, writer)?;
    }

    if !doc.samples.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "## Samples")?;
        for sample in &doc.samples {
            writeln!(writer)?;
            if let Some(caption) = sample.caption.as_deref().filter(|c| !c.trim().is_empty()) {
                writeln!(writer, "{}", caption.trim())?;
                writeln!(writer)?;
            }
            writeln!(writer, "```{}", sample.language)?;
            write_block(writer, &sample.code)?;
            writeln!(writer, "```")?;
        }
    }

    if !doc.related.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Related: {}", join_names(doc))?;
    }
    Ok(())
}

/// One line per document: name, category, title.
pub fn render_listing<'a>(
    docs: impl IntoIterator<Item = &'a PatternDocument>,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    let docs: Vec<&PatternDocument> = docs.into_iter().collect();
    let name_width = docs
        .iter()
        .map(|doc| doc.name.as_str().len())
        .max()
        .unwrap_or(0);
    let category_width = docs
        .iter()
        .map(|doc| doc.category.as_str().len())
        .max()
        .unwrap_or(0);
    for doc in docs {
        writeln!(
            writer,
            "{:<name_width$}  {:<category_width$}  {}",
            doc.name.as_str(),
            doc.category.as_str(),
            doc.title
        )?;
    }
    Ok(())
}

pub fn render_relations(
    catalog: &PatternCatalog,
    relations: &BTreeMap<String, RelationEntry>,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    for (name, entry) in relations {
        let title = catalog
            .get(name)
            .map(|doc| doc.title.as_str())
            .unwrap_or(name.as_str());
        writeln!(writer, "{name} ({title})")?;
        writeln!(writer, "  related      : {}", format_list(&entry.related))?;
        writeln!(writer, "  referenced by: {}", format_list(&entry.referenced_by))?;
    }
    Ok(())
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items.join(", ")
}

fn join_names(doc: &PatternDocument) -> String {
    doc.related
        .iter()
        .map(|name| name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_text_section(section: &Section, writer: &mut impl fmt::Write) -> fmt::Result {
    let heading = section.heading.trim();
    writeln!(writer, "{heading}")?;
    writeln!(writer, "{}", "-".repeat(heading.chars().count()))?;
    write_block(writer, &section.body)
}

fn write_markdown_section(section: &Section, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "## {}", section.heading.trim())?;
    writeln!(writer)?;
    write_block(writer, &section.body)
}

/// Write stored text as-is, dropping only trailing line breaks.
fn write_block(writer: &mut impl fmt::Write, text: &str) -> fmt::Result {
    writeln!(writer, "{}", text.trim_end_matches(['\n', '\r']))
}

/// Prefix every line with `indent`; empty lines stay empty.
fn write_indented(writer: &mut impl fmt::Write, text: &str, indent: &str) -> fmt::Result {
    for line in text.trim_end_matches(['\n', '\r']).lines() {
        if line.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(writer, "{indent}{line}")?;
        }
    }
    Ok(())
}
