//! Structured heading labels.
//!
//! A [`Label`] is an owned copy of a heading's inline content. It keeps
//! formatting such as `<sub>` or `<strong>` but is cloned through a sanitizer,
//! so whatever ends up inside a navigation link is a known-safe fragment and
//! never an unescaped string.

use crate::dom::{Document, NodeData};
use indextree::NodeId;
use serde::Serialize;
use url::{ParseError, Url};

/// Inline elements a label may carry. Any other element is unwrapped: its
/// children are kept, the element itself is not.
const ALLOWED_TAGS: [&str; 14] = [
    "em", "strong", "b", "i", "code", "sub", "sup", "span", "del", "mark", "small", "abbr", "img",
    "br",
];

/// Attributes kept on allowed elements. `src` is checked separately.
const ALLOWED_ATTRS: [&str; 2] = ["title", "alt"];

/// Subtrees dropped entirely, text included.
const DROPPED_TAGS: [&str; 9] = [
    "script", "style", "iframe", "object", "template", "noscript", "textarea", "svg", "math",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LabelNode {
    Text(String),
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        classes: Vec<String>,
        children: Vec<LabelNode>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Label {
    nodes: Vec<LabelNode>,
}

impl Label {
    /// A label holding a single text run.
    pub fn text(text: &str) -> Self {
        Self {
            nodes: vec![LabelNode::Text(text.to_string())],
        }
    }

    /// Sanitized copy of the children of `node`.
    pub fn from_children(doc: &Document, node: NodeId) -> Self {
        Self {
            nodes: doc
                .children(node)
                .into_iter()
                .flat_map(|child| sanitize(doc, child))
                .collect(),
        }
    }

    pub fn nodes(&self) -> &[LabelNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The label's text with all formatting removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            push_text(node, &mut out);
        }
        out
    }

    /// Append a fresh copy of the label to `parent`.
    pub fn instantiate(&self, doc: &mut Document, parent: NodeId) {
        for node in &self.nodes {
            let child = build(doc, node);
            doc.append(parent, child);
        }
    }
}

fn sanitize(doc: &Document, node: NodeId) -> Vec<LabelNode> {
    let children = |doc: &Document| -> Vec<LabelNode> {
        doc.children(node)
            .into_iter()
            .flat_map(|child| sanitize(doc, child))
            .collect()
    };
    match doc.get(node) {
        Some(NodeData::Text(text)) => vec![LabelNode::Text(text.clone())],
        Some(NodeData::Comment(_)) | None => Vec::new(),
        Some(NodeData::Element(element)) => {
            let tag = element.tag.to_ascii_lowercase();
            if DROPPED_TAGS.contains(&tag.as_str()) {
                return Vec::new();
            }
            // A link inside a link is invalid; keep the text, drop the target.
            let tag = if tag == "a" { "span".to_string() } else { tag };
            if !ALLOWED_TAGS.contains(&tag.as_str()) {
                return children(doc);
            }
            let attrs = element
                .attrs
                .iter()
                .filter(|(name, value)| {
                    let name = name.to_ascii_lowercase();
                    ALLOWED_ATTRS.contains(&name.as_str())
                        || (name == "src" && tag == "img" && is_safe_source(value))
                })
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            vec![LabelNode::Element {
                tag,
                attrs,
                classes: element.classes.iter().cloned().collect(),
                children: children(doc),
            }]
        }
    }
}

/// Relative addresses and plain web addresses only.
fn is_safe_source(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

fn build(doc: &mut Document, node: &LabelNode) -> NodeId {
    match node {
        LabelNode::Text(text) => doc.create_text(text),
        LabelNode::Element {
            tag,
            attrs,
            classes,
            children,
        } => {
            let element = doc.create_element(tag);
            for (name, value) in attrs {
                doc.set_attr(element, name, value);
            }
            for class in classes {
                doc.add_class(element, class);
            }
            for child in children {
                let child = build(doc, child);
                doc.append(element, child);
            }
            element
        }
    }
}

fn push_text(node: &LabelNode, out: &mut String) {
    match node {
        LabelNode::Text(text) => out.push_str(text),
        LabelNode::Element { children, .. } => {
            for child in children {
                push_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_with_markup() -> (Document, NodeId) {
        let mut doc = Document::new();
        let heading = doc.create_element("h2");
        doc.set_id(heading, "water");

        let text = doc.create_text("H");
        doc.append(heading, text);

        let sub = doc.create_element("sub");
        doc.set_id(sub, "dup");
        doc.set_attr(sub, "onclick", "steal()");
        doc.add_class(sub, "chem");
        let two = doc.create_text("2");
        doc.append(sub, two);
        doc.append(heading, sub);

        let script = doc.create_element("script");
        let code = doc.create_text("alert(1)");
        doc.append(script, code);
        doc.append(heading, script);

        let link = doc.create_element("a");
        doc.set_attr(link, "href", "https://example.com");
        doc.set_attr(link, "title", "oxide");
        let o = doc.create_text("O");
        doc.append(link, o);
        doc.append(heading, link);

        (doc, heading)
    }

    #[test]
    fn test_label_keeps_formatting() {
        let (doc, heading) = heading_with_markup();
        let label = Label::from_children(&doc, heading);
        assert_eq!(label.plain_text(), "H2O");
        assert!(matches!(&label.nodes()[1], LabelNode::Element { tag, .. } if tag == "sub"));
    }

    #[test]
    fn test_label_is_sanitized() {
        let (mut doc, heading) = heading_with_markup();
        let label = Label::from_children(&doc, heading);

        let target = doc.create_element("a");
        label.instantiate(&mut doc, target);
        assert_eq!(
            doc.inner_html(target),
            "H<sub class=\"chem\">2</sub><span title=\"oxide\">O</span>"
        );
    }

    #[test]
    fn test_label_drops_active_content() {
        let mut doc = Document::new();
        let heading = doc.create_element("h2");
        let nodes = doc.parse_fragment(concat!(
            r#"Forms <embed src="movie.swf">"#,
            r#"<form action="javascript:alert(1)"><button formaction="javascript:alert(2)">go</button></form>"#,
            r#"<img src="javascript:alert(3)" alt="x"><img src="icons/form.png" alt="icon">"#,
            r#"<svg><title>t</title></svg><!-- note --><b onmouseover="x()">!</b>"#,
        ));
        for node in nodes {
            doc.append(heading, node);
        }

        let label = Label::from_children(&doc, heading);
        let target = doc.create_element("a");
        label.instantiate(&mut doc, target);
        assert_eq!(
            doc.inner_html(target),
            "Forms go<img alt=\"x\"><img src=\"icons/form.png\" alt=\"icon\"><b>!</b>"
        );
    }

    #[test]
    fn test_safe_sources() {
        assert!(is_safe_source("https://example.com/a.png"));
        assert!(is_safe_source("a.png"));
        assert!(is_safe_source("/img/a.png"));
        assert!(!is_safe_source("javascript:alert(1)"));
        assert!(!is_safe_source(" JavaScript:alert(1)"));
        assert!(!is_safe_source("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_instantiate_copies() {
        let mut doc = Document::new();
        let label = Label::text("Intro");
        let first = doc.create_element("a");
        let second = doc.create_element("a");
        label.instantiate(&mut doc, first);
        label.instantiate(&mut doc, second);
        assert_eq!(doc.text_content(first), "Intro");
        assert_eq!(doc.text_content(second), "Intro");
    }
}
