//! Single-pass construction of the navigation tree.
//!
//! The tree is emitted as nested lists: every entry is an `<li>` holding the
//! navigation link, and an entry that gains children turns into a collapsible
//! group (`<details>`) whose `<summary>` carries the entry's own link. While
//! walking the headings the builder also records where each content block
//! starts; blocks are materialized afterwards by [`partition`].
//!
//! [`partition`]: crate::toc::partition()

use crate::dom::Document;
use crate::toc::classify::{DepthOrder, HeadingMarker};
use crate::toc::label::Label;
use crate::toc::{ATTR_LINK_SECTION, ATTR_LINK_TREE, CLASS_BLOCK, LINK_PREFIX};
use indextree::NodeId;
use tracing::{debug, trace, warn};

/// Start of a content block: the heading that opens it and the block id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub block_id: String,
    pub start: NodeId,
}

/// Output of [`TreeBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTree {
    /// The outermost `<ul>`, not yet attached anywhere.
    pub root_list: NodeId,
    /// One generated link per heading, in document order.
    pub links: Vec<NodeId>,
    /// One partition per heading, in document order.
    pub partitions: Vec<Partition>,
}

pub struct TreeBuilder<'a> {
    doc: &'a mut Document,
    order: &'a DepthOrder,
    container_id: String,
}

impl<'a> TreeBuilder<'a> {
    /// `container_id` is recorded on every link so it can find its tree.
    pub fn new(doc: &'a mut Document, order: &'a DepthOrder, container_id: &str) -> Self {
        Self {
            doc,
            order,
            container_id: container_id.to_string(),
        }
    }

    /// Build the tree for `markers`. Returns `None` when no marker has a
    /// kind in the depth order.
    ///
    /// The first marker defines the top of the tree. A marker more than one
    /// level deeper than its predecessor gets placeholder entries for the
    /// skipped levels; a shallower marker walks back up one group per level.
    pub fn build(mut self, markers: &[HeadingMarker]) -> Option<BuiltTree> {
        let mut prev_level: isize = -1;
        let mut root_list: Option<NodeId> = None;
        let mut current_list: Option<NodeId> = None;
        let mut current_item: Option<NodeId> = None;
        let mut links = Vec::with_capacity(markers.len());
        let mut partitions = Vec::with_capacity(markers.len());

        for marker in markers {
            let Some(level) = self.order.depth_of(marker.kind) else {
                warn!(kind = %marker.kind, "heading kind missing from depth order, skipped");
                continue;
            };
            let level = level as isize;

            let block_id = format!("{}{}", CLASS_BLOCK, self.doc.next_block_number());
            partitions.push(Partition {
                block_id: block_id.clone(),
                start: marker.node,
            });

            while level > prev_level {
                let list = self.doc.create_element("ul");
                match current_item.filter(|_| prev_level >= 0) {
                    Some(item) => self.open_group(item, list),
                    None => root_list = Some(list),
                }
                if level > prev_level + 1 {
                    let placeholder = self.doc.create_element("li");
                    self.doc.append(list, placeholder);
                    current_item = Some(placeholder);
                    trace!(level = prev_level + 1, "synthesized placeholder entry");
                }
                current_list = Some(list);
                prev_level += 1;
            }

            while level < prev_level {
                current_list = current_list.and_then(|list| self.enclosing_list(list));
                prev_level -= 1;
            }

            let Some(list) = current_list else {
                continue;
            };
            let item = self.doc.create_element("li");
            self.doc.append(list, item);
            links.push(self.create_link(item, &marker.label, &block_id));
            current_item = Some(item);
        }

        let root_list = root_list?;
        debug!(
            entries = links.len(),
            depth = self.order.len(),
            "built navigation tree"
        );
        Some(BuiltTree {
            root_list,
            links,
            partitions,
        })
    }

    /// Turn `item` into a collapsible group whose children live in `list`.
    /// The item's own link moves into the group's summary.
    fn open_group(&mut self, item: NodeId, list: NodeId) {
        let details = self.doc.create_element("details");
        self.doc.append(item, details);

        if let Some(first) = self.doc.first_child(item) {
            if self.doc.tag(first) == Some("a") {
                let summary = self.doc.create_element("summary");
                self.doc.append(details, summary);
                self.doc.append(summary, first);
            }
        }
        self.doc.append(details, list);
    }

    /// The list one level above `list`.
    fn enclosing_list(&self, list: NodeId) -> Option<NodeId> {
        let parent = self.doc.parent(list)?;
        self.doc.closest(parent, |e| e.tag == "ul")
    }

    fn create_link(&mut self, item: NodeId, label: &Label, block_id: &str) -> NodeId {
        let link = self.doc.create_element("a");
        self.doc.append(item, link);
        label.instantiate(self.doc, link);
        self.doc.set_id(link, &format!("{}{}", LINK_PREFIX, block_id));
        self.doc.set_attr(link, ATTR_LINK_SECTION, block_id);
        self.doc.set_attr(link, ATTR_LINK_TREE, &self.container_id);
        self.doc.set_attr(link, "href", &format!("#{}", block_id));
        link
    }
}
