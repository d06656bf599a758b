use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "treetoc")]
#[command(version)]
#[command(about = "Build a collapsible tree of contents that shows one section at a time")]
#[command(
    long_about = "treetoc - Turn a markdown document into a page with a collapsible tree of contents.\n\n\
    Headings become nested navigation entries, the content is split into one block per\n\
    heading, and only the selected block is shown. Fragment identifiers select a block\n\
    the same way a click on its entry does.\n\n\
    Examples:\n  \
    treetoc README.md                    # HTML page on stdout\n  \
    treetoc -o tree README.md            # Show the navigation tree\n  \
    treetoc -H h1,h2 -o json doc.md      # Two-level outline as JSON\n  \
    treetoc --fragment usage README.md   # Page opened at #usage"
)]
pub struct Cli {
    /// Markdown or HTML file to read, or '-' for stdin
    ///
    /// Files ending in .html or .htm are read as HTML pages. When no file is
    /// given, markdown is read from stdin.
    pub file: Option<PathBuf>,

    /// Heading kinds that become tree entries (comma separated)
    ///
    /// Headings of other kinds stay in the content but get no entry.
    ///
    /// Example: -H h1,h2,h3
    #[arg(short = 'H', long = "headings", value_name = "KINDS", value_delimiter = ',')]
    pub headings: Option<Vec<String>>,

    /// Id of the content region the tree is built for
    #[arg(long = "region-id", value_name = "ID")]
    pub region_id: Option<String>,

    /// Id of the element holding the tree
    ///
    /// When set, an empty element with this id is placed before the content
    /// region and the tree is built into it.
    #[arg(long = "container-id", value_name = "ID")]
    pub container_id: Option<String>,

    /// Address of the document, used to recognize links into the page
    ///
    /// Links whose href starts with this address are handled like '#' links.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Open the page at this fragment identifier
    ///
    /// Reveals the block containing the element with this id, as if the page
    /// had been loaded with '#ID' in its address.
    #[arg(long = "fragment", value_name = "ID")]
    pub fragment: Option<String>,

    /// Select a block after loading, as a click on its tree entry would
    ///
    /// Example: --activate toc-block2
    #[arg(long = "activate", value_name = "BLOCK_ID")]
    pub activate: Option<String>,

    /// Output format
    ///
    ///   html - Full page with the tree and the partitioned content (default)
    ///   json - Outline and navigation state as JSON
    ///   tree - Box-drawing tree structure
    #[arg(short = 'o', long = "output")]
    pub output: Option<OutputFormat>,

    /// Stylesheet href linked from the page head
    #[arg(long = "stylesheet", value_name = "HREF")]
    pub stylesheet: Option<String>,

    /// Page title
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Store the effective settings as the new defaults in the config file
    #[arg(long = "save-config")]
    pub save_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Complete HTML page
    Html,
    /// JSON outline
    Json,
    /// Box-drawing tree
    Tree,
}
