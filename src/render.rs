//! Plain-markdown rendering of a tenet catalog.
//!
//! The renderer intentionally stays text-only: one `##` section per entry in
//! authored order, fenced code blocks tagged with the example language, and
//! further-reading lines resolved against the catalog docs map. Tables of
//! contents, anchors, and syntax highlighting belong to whatever displays the
//! document, not here.
//!
//! `read_rendered_outline` walks rendered text back into `(id, title)` pairs
//! so tooling can confirm a document still carries the catalog it was
//! generated from.

use crate::catalog::{DocRef, EntryId, PrincipleEntry, TenetCatalog};
use crate::catalog::index::valid_entry_id;
use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;

/// Render the whole catalog as markdown text.
pub fn render_catalog(catalog: &TenetCatalog, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(writer, "# {}", catalog.catalog.title.trim())?;
    writeln!(writer)?;
    writeln!(writer, "{}", catalog.scope.description.trim())?;
    if let Some(notes) = catalog
        .scope
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
    {
        writeln!(writer)?;
        writeln!(writer, "{}", notes)?;
    }

    for entry in &catalog.entries {
        writeln!(writer)?;
        render_entry(entry, &catalog.docs, writer)?;
    }
    Ok(())
}

/// Render a single entry as a markdown section.
///
/// The id sits on its own backticked line directly under the heading; the
/// outline reader depends on that placement.
pub fn render_entry(
    entry: &PrincipleEntry,
    docs: &BTreeMap<String, DocRef>,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    writeln!(writer, "## {}", entry.title.trim())?;
    writeln!(writer)?;
    writeln!(writer, "`{}`", entry.id.0)?;
    writeln!(writer)?;
    writeln!(writer, "{}", entry.summary.trim())?;

    for example in &entry.examples {
        writeln!(writer)?;
        writeln!(writer, "```{}", example.language.as_str())?;
        for line in &example.lines {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer, "```")?;
        if let Some(caption) = example
            .caption
            .as_deref()
            .map(str::trim)
            .filter(|caption| !caption.is_empty())
        {
            writeln!(writer)?;
            writeln!(writer, "*{}*", caption)?;
        }
    }

    if let Some(notes) = entry
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
    {
        writeln!(writer)?;
        writeln!(writer, "{}", notes)?;
    }

    if !entry.sources.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Further reading:")?;
        for source in &entry.sources {
            write!(writer, "- {}", doc_title(docs, &source.doc))?;
            if let Some(section) = source
                .section
                .as_deref()
                .map(str::trim)
                .filter(|section| !section.is_empty())
            {
                write!(writer, ", {}", section)?;
            }
            if let Some(url) = docs
                .get(&source.doc)
                .and_then(|doc| doc.url.as_deref())
                .map(str::trim)
                .filter(|url| !url.is_empty())
            {
                write!(writer, " ({})", url)?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn doc_title<'a>(docs: &'a BTreeMap<String, DocRef>, key: &'a str) -> &'a str {
    docs.get(key).map(|doc| doc.title.as_str()).unwrap_or(key)
}

/// One `(id, title)` pair recovered from rendered text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OutlineEntry {
    pub id: EntryId,
    pub title: String,
}

/// Errors that can occur while reading a rendered document back.
#[derive(Debug)]
pub enum OutlineReadError {
    Io(std::io::Error),
    Structure { line: usize, message: String },
}

impl fmt::Display for OutlineReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineReadError::Io(err) => write!(f, "failed to read rendered document: {err}"),
            OutlineReadError::Structure { line, message } => {
                write!(f, "line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for OutlineReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutlineReadError::Io(err) => Some(err),
            OutlineReadError::Structure { .. } => None,
        }
    }
}

/// Read the `(id, title)` outline of a rendered catalog document.
///
/// Fenced code blocks are skipped so example lines can never masquerade as
/// headings. Every `##` heading must be followed by a backticked id line;
/// errors carry the 1-based line number where the structure broke down.
pub fn read_rendered_outline<R: BufRead>(
    reader: R,
) -> Result<Vec<OutlineEntry>, OutlineReadError> {
    let mut outline = Vec::new();
    let mut pending_title: Option<(usize, String)> = None;
    let mut in_fence = false;
    let mut line_buf = String::new();
    let mut reader = reader;
    let mut line_number = 0usize;

    loop {
        line_buf.clear();
        let bytes = reader
            .read_line(&mut line_buf)
            .map_err(OutlineReadError::Io)?;
        if bytes == 0 {
            break;
        }
        line_number += 1;
        let line = line_buf.trim_end();

        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(title) = line.strip_prefix("## ") {
            if let Some((heading_line, title)) = pending_title.take() {
                return Err(OutlineReadError::Structure {
                    line: heading_line,
                    message: format!("heading '{title}' is not followed by an entry id line"),
                });
            }
            pending_title = Some((line_number, title.trim().to_string()));
            continue;
        }

        let Some((heading_line, title)) = pending_title.take() else {
            continue;
        };
        if line.trim().is_empty() {
            pending_title = Some((heading_line, title));
            continue;
        }

        let Some(id) = backticked_id(line.trim()) else {
            return Err(OutlineReadError::Structure {
                line: line_number,
                message: format!("expected a backticked entry id under heading '{title}'"),
            });
        };
        outline.push(OutlineEntry { id, title });
    }

    if let Some((heading_line, title)) = pending_title {
        return Err(OutlineReadError::Structure {
            line: heading_line,
            message: format!("heading '{title}' is not followed by an entry id line"),
        });
    }

    Ok(outline)
}

fn backticked_id(line: &str) -> Option<EntryId> {
    let inner = line.strip_prefix('`')?.strip_suffix('`')?;
    let id = EntryId(inner.to_string());
    valid_entry_id(&id).then_some(id)
}
