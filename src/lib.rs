//! # treetoc
//!
//! A collapsible tree of contents that shows one document section at a time.
//!
//! Headings inside a content region become nested navigation entries, the
//! region is split into one block per heading, and selecting an entry (by a
//! click or through the page's fragment identifier) reveals its block while
//! hiding the rest.
//!
//! ## Features
//!
//! - Nested tree built from a flat heading sequence, tolerating skipped levels
//! - Content partitioned into addressable blocks aligned with the tree
//! - Single visible block, kept in sync with fragment identifiers
//! - Several independent trees per document sharing one block numbering
//! - Markdown and HTML front ends, and HTML, JSON and box-drawing output
//!
//! ## Example
//!
//! ```rust
//! use treetoc::{TocOptions, TreeOfContents, parse_markdown};
//!
//! let markdown = r#"
//! # Introduction
//! Some content here.
//!
//! ## Background
//! More details.
//!
//! # Methodology
//! Research approach.
//! "#;
//!
//! let mut doc = parse_markdown(markdown, "content");
//! let region = doc.get_element_by_id("content");
//! let toc = TreeOfContents::initialize(&mut doc, region, &TocOptions::default())
//!     .unwrap()
//!     .expect("the region has headings");
//!
//! assert_eq!(toc.block_ids(), vec!["toc-block0", "toc-block1", "toc-block2"]);
//!
//! toc.activate(&mut doc, "toc-block1");
//! assert_eq!(toc.visible_block(&doc).unwrap().block_id, "toc-block1");
//!
//! for (i, node) in toc.outline(&doc).iter().enumerate() {
//!     print!("{}", node.render_box_tree("", i == 1));
//! }
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides the recognized heading kinds, region and container ids, and
/// output settings.
pub mod config;

/// Minimal document model the tree of contents operates on.
pub mod dom;

pub mod error;

/// Parser module for markdown documents and HTML pages.
///
/// Converts markdown into a [`Document`] with a single content region, or
/// reads an HTML page as it is.
pub mod parser;

/// Tree construction, content partitioning and navigation.
pub mod toc;

// Re-export commonly used types for convenience
pub use config::Config;
pub use dom::{BlockCounter, Document};
pub use error::TocError;
pub use parser::{parse_file, parse_html, parse_markdown};
pub use toc::{HeadingKind, OutlineNode, TocOptions, TocOutput, TreeOfContents};
