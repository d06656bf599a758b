//! Tree of contents: outline construction, content partitioning and
//! navigation.
//!
//! The pipeline runs in four steps: headings are scanned and classified into
//! a depth order, the [`TreeBuilder`] turns them into nested navigation lists
//! while recording partition boundaries, the [`partition`] step wraps each
//! run of content in its own block, and [`TreeOfContents`] wires links and
//! fragment identifiers so exactly one block is shown at a time.

pub mod builder;
pub mod classify;
pub mod label;
pub mod navigation;
pub mod outline;
pub mod partition;

pub use builder::{BuiltTree, Partition, TreeBuilder};
pub use classify::{DepthOrder, HeadingKind, HeadingMarker, scan_headings};
pub use label::{Label, LabelNode};
pub use navigation::{TocEntry, TocOptions, TreeOfContents};
pub use outline::{OutlineNode, TocOutput};
pub use partition::{ContentBlock, partition};

/// Class of the tree container, and prefix of its generated id.
pub const CLASS_TOC: &str = "tree-of-contents";

/// Class of each generated content block, and prefix of its id.
pub const CLASS_BLOCK: &str = "toc-block";

/// Class marking a hidden block or element.
pub const CLASS_HIDDEN: &str = "hidden";

/// Class marking the currently selected link.
pub const CLASS_CURRENT: &str = "current";

/// Class marking a link that has been selected at least once.
pub const CLASS_VISITED: &str = "visited";

/// Prefix of every generated navigation link id.
pub const LINK_PREFIX: &str = "link-";

/// Attribute holding the id of the tree container owning a link.
pub const ATTR_LINK_TREE: &str = "tree-element";

/// Attribute holding the id of the block a link targets.
pub const ATTR_LINK_SECTION: &str = "section";
