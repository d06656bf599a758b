//! # treetoc
//!
//! Turn a markdown document into a page with a collapsible tree of contents
//! that shows one section at a time.
//!
//! ## Usage
//!
//! Write the page to stdout:
//! ```sh
//! treetoc README.md > readme.html
//! ```
//!
//! Show the navigation tree:
//! ```sh
//! treetoc -o tree README.md
//! ```
//!
//! Open the page at a fragment:
//! ```sh
//! treetoc --fragment installation README.md
//! ```
//!
//! Keep two-level trees as the default from now on:
//! ```sh
//! treetoc -H h1,h2 --save-config README.md
//! ```

mod cli;

use clap::{Parser as ClapParser, ValueEnum};
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::io::{self, Read};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use treetoc::config::{OutputConfig, TocConfig};
use treetoc::{Config, Document, HeadingKind, TocOptions, TocOutput, TreeOfContents, parser};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so stdout only carries the output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::load();

    // Priority: CLI args > config file > defaults
    let headings = match args.headings {
        Some(ref names) => HeadingKind::parse_list(names)?,
        None => config.heading_kinds()?,
    };
    let region_id = args
        .region_id
        .clone()
        .unwrap_or_else(|| config.toc.region_id.clone());
    let container_id = args
        .container_id
        .clone()
        .or_else(|| config.toc.container_id.clone());
    let format = match args.output {
        Some(format) => format,
        None => OutputFormat::from_str(&config.output.format, true)
            .map_err(|e| eyre!("invalid output format in config: {}", e))?,
    };

    let title = args.title.clone().or_else(|| config.output.title.clone());
    let stylesheet = args
        .stylesheet
        .clone()
        .or_else(|| config.output.stylesheet.clone());

    if args.save_config {
        let format_name = format
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_else(|| config.output.format.clone());
        let effective = Config {
            toc: TocConfig {
                headings: headings.iter().map(ToString::to_string).collect(),
                region_id: region_id.clone(),
                container_id: container_id.clone(),
            },
            output: OutputConfig {
                format: format_name,
                stylesheet: stylesheet.clone(),
                title: title.clone(),
            },
        };
        effective.save().wrap_err("failed to save config")?;
        info!(path = ?Config::config_path(), "saved config");
    }

    let mut doc = load_document(&args, &region_id)?;

    let location = match (&args.base_url, &args.fragment) {
        (Some(base), Some(fragment)) => Some(format!("{}#{}", base, fragment)),
        (Some(base), None) => Some(base.clone()),
        (None, Some(fragment)) => Some(format!("#{}", fragment)),
        (None, None) => None,
    };
    if let Some(location) = location {
        doc.set_location(location);
    }

    let region = doc.get_element_by_id(&region_id);
    let container = match (&container_id, region) {
        (Some(id), Some(region)) => {
            let node = doc.create_element("nav");
            doc.set_id(node, id);
            doc.insert_before(region, node);
            Some(node)
        }
        _ => None,
    };

    let options = TocOptions {
        headings: Some(headings),
        container,
    };
    let toc = TreeOfContents::initialize(&mut doc, region, &options)?;
    if toc.is_none() {
        debug!(region = %region_id, "no tree of contents built");
    }

    if let Some(block_id) = &args.activate {
        let activated = toc
            .as_ref()
            .is_some_and(|toc| toc.activate(&mut doc, block_id));
        if !activated {
            warn!(block_id = %block_id, "no navigation entry for block");
        }
    }

    match format {
        OutputFormat::Html => {
            write_head(&mut doc, title.as_deref(), stylesheet.as_deref());
            print!("{}", doc.to_html());
        }
        OutputFormat::Json => {
            let output = toc.as_ref().map(|toc| TocOutput::new(toc, &doc));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tree => {
            let outline = toc.as_ref().map(|toc| toc.outline(&doc)).unwrap_or_default();
            for (i, node) in outline.iter().enumerate() {
                let is_last = i == outline.len() - 1;
                print!("{}", node.render_box_tree("", is_last));
            }
        }
    }

    Ok(())
}

fn load_document(args: &Cli, region_id: &str) -> Result<Document> {
    match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => Ok(parser::parse_file(path, region_id)?),
        _ => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .wrap_err("failed to read stdin")?;
            Ok(parser::parse_markdown(&markdown, region_id))
        }
    }
}

fn write_head(doc: &mut Document, title: Option<&str>, stylesheet: Option<&str>) {
    let head = doc.head();

    let charset = doc.create_element("meta");
    doc.set_attr(charset, "charset", "utf-8");
    doc.append(head, charset);

    if let Some(title) = title {
        let node = doc.create_element("title");
        let text = doc.create_text(title);
        doc.append(node, text);
        doc.append(head, node);
    }

    if let Some(href) = stylesheet {
        let link = doc.create_element("link");
        doc.set_attr(link, "rel", "stylesheet");
        doc.set_attr(link, "href", href);
        doc.append(head, link);
    }
}
