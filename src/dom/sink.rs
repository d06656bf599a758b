//! html5ever `TreeSink` that builds into a [`Document`] arena.

use super::{Document, NodeData};
use html5ever::interface::ElemName;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, LocalName, Namespace, ParseOpts, QualName, parse_document};
use indextree::NodeId;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::trace;

/// Element name handed back to the tree builder.
#[derive(Debug)]
pub struct SinkName(QualName);

impl ElemName for SinkName {
    fn ns(&self) -> &Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// Parses into a detached scratch node of an existing document, so the
/// resulting nodes can be moved anywhere in it afterwards.
///
/// html5ever's `TreeSink` takes `&self`, hence the `RefCell`s.
struct DocumentSink<'d> {
    doc: RefCell<&'d mut Document>,
    document: NodeId,
    /// Full names as parsed; the arena only keeps the local tag.
    names: RefCell<HashMap<NodeId, QualName>>,
}

impl TreeSink for DocumentSink<'_> {
    type Handle = NodeId;
    type Output = NodeId;
    type ElemName<'a>
        = SinkName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self.document
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        trace!(%msg, "lenient html parse");
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        let name = self.names.borrow().get(target).cloned();
        SinkName(name.unwrap_or_else(|| {
            let tag = self.doc.borrow().tag(*target).unwrap_or_default().to_string();
            super::html::element_name(&tag)
        }))
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let mut doc = self.doc.borrow_mut();
        let node = doc.create_element(&name.local);
        for attr in attrs {
            doc.set_attr(node, &attribute_key(&attr.name), &attr.value);
        }
        self.names.borrow_mut().insert(node, name);
        node
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.doc.borrow_mut().create_comment(&text)
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        self.doc.borrow_mut().create_comment("")
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => doc.append(*parent, node),
            NodeOrText::AppendText(text) => append_text(&mut doc, *parent, &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.doc.borrow().parent(*element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Serialization always writes an HTML5 doctype.
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => doc.create_text(&text),
        };
        doc.insert_before(*sibling, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut doc = self.doc.borrow_mut();
        for attr in attrs {
            let key = attribute_key(&attr.name);
            if doc.attr(*target, &key).is_none() {
                doc.set_attr(*target, &key, &attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.doc.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut doc = self.doc.borrow_mut();
        for child in doc.children(*node) {
            doc.append(*new_parent, child);
        }
    }
}

fn attribute_key(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

/// Append text to `parent`, merging with a trailing text node.
fn append_text(doc: &mut Document, parent: NodeId, text: &str) {
    let last = doc.arena.get(parent).and_then(|n| n.last_child());
    if let Some(last) = last {
        if let Some(NodeData::Text(existing)) = doc.arena.get_mut(last).map(|n| n.get_mut()) {
            existing.push_str(text);
            return;
        }
    }
    let node = doc.create_text(text);
    doc.append(parent, node);
}

impl Document {
    /// Parse a complete HTML page.
    ///
    /// The contents of the parsed `<head>` and `<body>` move into the new
    /// document's skeleton, attributes of `<html>`, `<head>` and `<body>`
    /// included.
    pub fn from_html(html: &str) -> Self {
        let mut doc = Document::new();
        let scratch = doc.parse_into_scratch(html);

        for (tag, target) in [("html", doc.root), ("head", doc.head), ("body", doc.body)] {
            let Some(source) = doc.first_by_tag(scratch, tag) else {
                continue;
            };
            if let Some(element) = doc.element(source).cloned() {
                if let Some(dest) = doc.element_mut(target) {
                    dest.attrs = element.attrs;
                    dest.classes = element.classes;
                }
            }
            if tag != "html" {
                for child in doc.children(source) {
                    doc.append(target, child);
                }
            }
        }
        scratch.remove_subtree(&mut doc.arena);
        doc
    }

    /// Parse an HTML fragment as body content.
    ///
    /// Returns the top-level nodes in document order, detached and ready to
    /// be inserted.
    pub fn parse_fragment(&mut self, html: &str) -> Vec<NodeId> {
        let wrapped = format!(
            "<!DOCTYPE html><html><head></head><body>{}</body></html>",
            html
        );
        let scratch = self.parse_into_scratch(&wrapped);
        let nodes = self
            .first_by_tag(scratch, "body")
            .map(|body| self.children(body))
            .unwrap_or_default();
        for &node in &nodes {
            self.detach(node);
        }
        scratch.remove_subtree(&mut self.arena);
        nodes
    }

    fn parse_into_scratch(&mut self, html: &str) -> NodeId {
        let document = self.create_element("#document");
        let sink = DocumentSink {
            doc: RefCell::new(self),
            document,
            names: RefCell::default(),
        };
        parse_document(sink, ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
    }

    fn first_by_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(scope).find(|&n| self.tag(n) == Some(tag))
    }
}
