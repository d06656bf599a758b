//! Markdown and HTML front ends.
//!
//! Markdown becomes a [`Document`] whose body holds one content region filled
//! with the rendered markdown. Headings come out as `h1`..`h6` elements with
//! stable ids, which is everything the tree of contents needs from its input.
//! HTML pages are parsed as they are and are expected to carry their own
//! region.

pub mod content;
mod markdown;

use crate::dom::Document;
use crate::error::TocError;
use std::path::Path;
use tracing::debug;

pub use content::{SlugRegistry, slugify};

/// Parse a file into a document.
///
/// Files ending in `.html` or `.htm` are read as HTML pages; `region_id` is
/// then only looked up later, never created. Anything else is markdown.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path, region_id: &str) -> Result<Document, TocError> {
    let content = std::fs::read_to_string(path).map_err(|source| TocError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if is_html_path(path) {
        return Ok(parse_html(&content));
    }
    Ok(parse_markdown(&content, region_id))
}

fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Parse a complete HTML page.
pub fn parse_html(content: &str) -> Document {
    let doc = Document::from_html(content);
    debug!(nodes = doc.descendants(doc.root()).count(), "parsed html page");
    doc
}

/// Parse markdown into a document with a single `<div id=region_id>` content
/// region in its body.
pub fn parse_markdown(content: &str, region_id: &str) -> Document {
    let mut doc = Document::new();
    let region = doc.create_element("div");
    doc.set_id(region, region_id);
    let body = doc.body();
    doc.append(body, region);

    markdown::render_into(&mut doc, region, content);
    doc
}
