//! Wrapping runs of content into addressable blocks.

use crate::dom::Document;
use crate::toc::CLASS_BLOCK;
use crate::toc::builder::Partition;
use indextree::NodeId;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A generated `<div>` wrapping one section of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub block_id: String,
    pub node: NodeId,
}

/// Wrap each partition's run of content in its own block.
///
/// A run starts at the partition's heading and extends over the following
/// siblings up to, not including, the first sibling that is or contains a
/// later heading. When no such sibling exists the run ends with the
/// heading's parent, which for scanned markers is the region. Content is moved, never copied, so reading the blocks
/// back in order yields the original content.
pub fn partition(doc: &mut Document, partitions: &[Partition]) -> Vec<ContentBlock> {
    let starts: HashSet<NodeId> = partitions.iter().map(|p| p.start).collect();

    // Every run is computed before anything moves.
    let runs: Vec<(&Partition, Vec<NodeId>)> = partitions
        .iter()
        .filter_map(|p| {
            let run = run_from(doc, p.start, &starts);
            if run.is_empty() {
                warn!(block_id = %p.block_id, "partition start is detached, skipped");
                None
            } else {
                Some((p, run))
            }
        })
        .collect();

    let mut blocks = Vec::with_capacity(runs.len());
    for (partition, run) in runs {
        let block = doc.create_element("div");
        doc.set_id(block, &partition.block_id);
        doc.add_class(block, CLASS_BLOCK);
        doc.insert_before(run[0], block);
        for node in &run {
            doc.append(block, *node);
        }
        debug!(block_id = %partition.block_id, nodes = run.len(), "wrapped content block");
        blocks.push(ContentBlock {
            block_id: partition.block_id.clone(),
            node: block,
        });
    }
    blocks
}

fn run_from(doc: &Document, start: NodeId, starts: &HashSet<NodeId>) -> Vec<NodeId> {
    let Some(parent) = doc.parent(start) else {
        return Vec::new();
    };
    doc.children(parent)
        .into_iter()
        .skip_while(|&n| n != start)
        .enumerate()
        .take_while(|&(i, n)| i == 0 || !doc.descendants(n).any(|d| starts.contains(&d)))
        .map(|(_, n)| n)
        .collect()
}
