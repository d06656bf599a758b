//! Typed view of a generated tree, for JSON and box-drawing output.

use crate::dom::Document;
use crate::toc::navigation::TreeOfContents;
use crate::toc::ATTR_LINK_SECTION;
use indextree::NodeId;
use serde::{Deserialize, Serialize};

/// One entry of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Target block, or `None` for a placeholder standing in for a skipped
    /// heading level.
    #[serde(rename = "blockId")]
    pub block_id: Option<String>,
    pub label: String,
    pub depth: usize,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn is_placeholder(&self) -> bool {
        self.block_id.is_none()
    }

    /// Number of entries in this subtree, placeholders included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count).sum::<usize>()
    }

    /// Render this subtree with box-drawing characters.
    pub fn render_box_tree(&self, prefix: &str, is_last: bool) -> String {
        let connector = if is_last { "└── " } else { "├── " };
        let label = if self.is_placeholder() { "…" } else { self.label.as_str() };
        let mut out = format!("{}{}{}\n", prefix, connector, label);

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, child) in self.children.iter().enumerate() {
            let child_is_last = i == self.children.len() - 1;
            out.push_str(&child.render_box_tree(&child_prefix, child_is_last));
        }
        out
    }
}

/// Serializable summary of one tree and its current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocOutput {
    #[serde(rename = "containerId")]
    pub container_id: Option<String>,
    #[serde(rename = "regionId")]
    pub region_id: Option<String>,
    /// Block id of the visible block, if any.
    pub current: Option<String>,
    #[serde(rename = "entryCount")]
    pub entry_count: usize,
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
    pub entries: Vec<OutlineNode>,
}

impl TocOutput {
    pub fn new(toc: &TreeOfContents, doc: &Document) -> Self {
        let entries = toc.outline(doc);
        Self {
            container_id: doc.id(toc.container()).map(str::to_string),
            region_id: doc.id(toc.region()).map(str::to_string),
            current: toc.visible_block(doc).map(|e| e.block_id.clone()),
            entry_count: entries.iter().map(OutlineNode::count).sum(),
            max_depth: entries.iter().map(max_depth).max().unwrap_or(0),
            entries,
        }
    }
}

fn max_depth(node: &OutlineNode) -> usize {
    node.children
        .iter()
        .map(max_depth)
        .max()
        .unwrap_or(node.depth)
}

/// Read the `<li>` entries of `list` back into outline nodes.
pub(crate) fn read_outline(doc: &Document, list: NodeId, depth: usize) -> Vec<OutlineNode> {
    doc.children(list)
        .into_iter()
        .filter(|&item| doc.tag(item) == Some("li"))
        .map(|item| {
            let mut link = None;
            let mut nested = None;
            for child in doc.children(item) {
                match doc.tag(child) {
                    Some("a") => link = Some(child),
                    Some("details") => {
                        for inner in doc.children(child) {
                            match doc.tag(inner) {
                                Some("summary") => {
                                    link = doc
                                        .children(inner)
                                        .into_iter()
                                        .find(|&n| doc.tag(n) == Some("a"));
                                }
                                Some("ul") => nested = Some(inner),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            OutlineNode {
                block_id: link
                    .and_then(|l| doc.attr(l, ATTR_LINK_SECTION))
                    .map(str::to_string),
                label: link.map(|l| doc.text_content(l)).unwrap_or_default(),
                depth,
                children: nested
                    .map(|n| read_outline(doc, n, depth + 1))
                    .unwrap_or_default(),
            }
        })
        .collect()
}
