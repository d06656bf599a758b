//! Heading kinds, the heading scan, and depth classification.

use crate::dom::Document;
use crate::error::TocError;
use crate::toc::label::Label;
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

/// One of the six generic heading levels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HeadingKind {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingKind {
    /// All kinds, shallowest to deepest.
    pub fn all() -> Vec<HeadingKind> {
        HeadingKind::iter().collect()
    }

    /// The kind named by an element tag, if it is a heading tag.
    pub fn from_tag(tag: &str) -> Option<HeadingKind> {
        HeadingKind::from_str(tag).ok()
    }

    /// Parse a list of kind names such as `["h1", "H3"]`.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<HeadingKind>, TocError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                HeadingKind::from_str(name)
                    .map_err(|_| TocError::UnknownHeadingKind(name.to_string()))
            })
            .collect()
    }
}

/// A heading found in the content region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMarker {
    /// The heading element itself.
    pub node: NodeId,
    pub kind: HeadingKind,
    pub label: Label,
}

/// Collect the heading markers among the children of `region`, in document
/// order.
///
/// Only elements whose tag is one of `recognized` count; other headings are
/// ignored. Headings nested inside other elements stay part of whatever
/// block holds that element, so every child of the region after the first
/// marker lands in exactly one block.
pub fn scan_headings(
    doc: &Document,
    region: NodeId,
    recognized: &[HeadingKind],
) -> Vec<HeadingMarker> {
    doc.children(region)
        .into_iter()
        .filter_map(|node| {
            let kind = HeadingKind::from_tag(doc.tag(node)?)?;
            recognized.contains(&kind).then(|| HeadingMarker {
                node,
                kind,
                label: Label::from_children(doc, node),
            })
        })
        .collect()
}

/// The heading kinds actually present, shallowest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthOrder {
    kinds: Vec<HeadingKind>,
}

impl DepthOrder {
    /// Keep the kinds of `recognized` that occur in `markers`, in the order
    /// of `recognized`.
    pub fn classify(markers: &[HeadingMarker], recognized: &[HeadingKind]) -> Self {
        let present: HashSet<HeadingKind> = markers.iter().map(|m| m.kind).collect();
        let mut kinds = Vec::new();
        for kind in recognized {
            if present.contains(kind) && !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        debug!(?kinds, "classified heading kinds");
        Self { kinds }
    }

    /// Depth of `kind`, zero being the shallowest present kind.
    pub fn depth_of(&self, kind: HeadingKind) -> Option<usize> {
        self.kinds.iter().position(|k| *k == kind)
    }

    pub fn kinds(&self) -> &[HeadingKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_with(tags: &[&str]) -> (Document, NodeId) {
        let mut doc = Document::new();
        let region = doc.create_element("div");
        let body = doc.body();
        doc.append(body, region);
        for tag in tags {
            let node = doc.create_element(tag);
            let text = doc.create_text(&format!("{} text", tag));
            doc.append(node, text);
            doc.append(region, node);
        }
        (doc, region)
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(HeadingKind::H3.to_string(), "h3");
        assert_eq!(HeadingKind::from_tag("H2"), Some(HeadingKind::H2));
        assert_eq!(HeadingKind::from_tag("p"), None);
        assert_eq!(HeadingKind::all().len(), 6);
    }

    #[test]
    fn test_parse_list_rejects_unknown_names() {
        let kinds = HeadingKind::parse_list(&["h1", " H4 "]).unwrap();
        assert_eq!(kinds, vec![HeadingKind::H1, HeadingKind::H4]);

        let err = HeadingKind::parse_list(&["h1", "h7"]).unwrap_err();
        assert!(matches!(err, TocError::UnknownHeadingKind(name) if name == "h7"));
    }

    #[test]
    fn test_scan_keeps_document_order_and_recognized_kinds() {
        let (doc, region) = region_with(&["h2", "p", "h1", "h4", "h3"]);
        let markers = scan_headings(&doc, region, &[HeadingKind::H1, HeadingKind::H2, HeadingKind::H3]);
        let kinds: Vec<_> = markers.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![HeadingKind::H2, HeadingKind::H1, HeadingKind::H3]);
        assert_eq!(markers[0].label.plain_text(), "h2 text");
    }

    #[test]
    fn test_scan_skips_nested_headings() {
        let (mut doc, region) = region_with(&["h1"]);
        let section = doc.create_element("section");
        let inner = doc.create_element("h2");
        doc.append(section, inner);
        doc.append(region, section);

        let markers = scan_headings(&doc, region, &HeadingKind::all());
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, HeadingKind::H1);
    }

    #[test]
    fn test_classify_orders_by_recognized_list_not_occurrence() {
        let (doc, region) = region_with(&["h3", "h1", "h3"]);
        let markers = scan_headings(&doc, region, &HeadingKind::all());
        let order = DepthOrder::classify(&markers, &HeadingKind::all());

        assert_eq!(order.kinds(), &[HeadingKind::H1, HeadingKind::H3]);
        assert_eq!(order.depth_of(HeadingKind::H1), Some(0));
        assert_eq!(order.depth_of(HeadingKind::H3), Some(1));
        assert_eq!(order.depth_of(HeadingKind::H2), None);
    }

    #[test]
    fn test_classify_empty_input() {
        let (doc, region) = region_with(&["p"]);
        let markers = scan_headings(&doc, region, &HeadingKind::all());
        assert!(markers.is_empty());
        assert!(DepthOrder::classify(&markers, &HeadingKind::all()).is_empty());
    }

    #[test]
    fn test_caller_order_defines_depth() {
        let (doc, region) = region_with(&["h1", "h2"]);
        let recognized = [HeadingKind::H2, HeadingKind::H1];
        let markers = scan_headings(&doc, region, &recognized);
        let order = DepthOrder::classify(&markers, &recognized);
        assert_eq!(order.depth_of(HeadingKind::H2), Some(0));
        assert_eq!(order.depth_of(HeadingKind::H1), Some(1));
    }
}
