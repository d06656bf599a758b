//! HTML serialization for [`Document`] through html5ever's serializer.
//!
//! html5ever decides escaping, raw-text elements (`style`, `script`, ...) and
//! void elements; this module only walks the arena in the shape its
//! [`Serializer`] expects.

use super::{Document, NodeData};
use html5ever::serialize::{
    Serialize, SerializeOpts, Serializer, TraversalScope, serialize,
};
use html5ever::{LocalName, QualName, ns};
use indextree::NodeId;
use std::io;
use tracing::warn;

/// Qualified name of an HTML element.
pub(super) fn element_name(tag: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(tag))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name))
}

/// A node of a [`Document`], serializable on its own.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl Document {
    /// `node` as something html5ever can serialize.
    pub fn node_ref(&self, node: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, node }
    }

    /// Serialize the whole page, doctype included.
    pub fn to_html(&self) -> String {
        let mut out = render(self, TraversalScope::IncludeNode);
        out.push('\n');
        out
    }

    /// Serialize `node` including its own tags.
    pub fn outer_html(&self, node: NodeId) -> String {
        render(&self.node_ref(node), TraversalScope::IncludeNode)
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        // The parent name tells the serializer whether text is raw.
        let parent = self.tag(node).map(element_name);
        render(&self.node_ref(node), TraversalScope::ChildrenOnly(parent))
    }
}

fn render<T: Serialize>(node: &T, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(err) = serialize(&mut bytes, node, opts) {
        warn!(%err, "html serialization failed");
    }
    String::from_utf8(bytes).unwrap_or_default()
}

impl Serialize for Document {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        if let TraversalScope::IncludeNode = traversal_scope {
            serializer.write_doctype("html")?;
            serializer.write_text("\n")?;
        }
        serialize_node(self, self.root(), serializer)
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => serialize_node(self.doc, self.node, serializer),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.doc.children(self.node) {
                    serialize_node(self.doc, child, serializer)?;
                }
                Ok(())
            }
        }
    }
}

fn serialize_node<S: Serializer>(doc: &Document, node: NodeId, serializer: &mut S) -> io::Result<()> {
    match doc.get(node) {
        Some(NodeData::Text(text)) => serializer.write_text(text),
        Some(NodeData::Comment(text)) => serializer.write_comment(text),
        Some(NodeData::Element(element)) => {
            let name = element_name(&element.tag);
            let mut attrs: Vec<(QualName, String)> = element
                .attrs
                .iter()
                .map(|(name, value)| (attribute_name(name), value.clone()))
                .collect();
            // Classes live apart from the attribute map and are written last.
            if !element.classes.is_empty() {
                let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
                attrs.push((attribute_name("class"), classes.join(" ")));
            }

            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|(name, value)| (name, value.as_str())),
            )?;
            for child in doc.children(node) {
                serialize_node(doc, child, serializer)?;
            }
            serializer.end_elem(name)
        }
        None => Ok(()),
    }
}
