//! Error types for the library.

use indextree::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised for caller mistakes and I/O.
///
/// Missing headings, absent content regions and unresolvable fragments are
/// not errors; those paths are silent no-ops.
#[derive(Debug, Error)]
pub enum TocError {
    #[error("unknown heading kind `{0}` (expected one of h1..h6)")]
    UnknownHeadingKind(String),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TocError>;
