//! In-memory document model.
//!
//! A [`Document`] is an `indextree` arena of element and text nodes under an
//! `<html><head/><body/></html>` skeleton. It carries the page-level state the
//! tree of contents needs from its host: the page location, the last scroll
//! request, the block numbering source and the click listeners attached to
//! individual nodes.

mod html;
mod numbering;
mod sink;

pub use html::NodeRef;
pub use numbering::BlockCounter;

use indexmap::{IndexMap, IndexSet};
use indextree::{Arena, NodeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Click listener attached to a node.
///
/// The closure captures whatever context it needs (the link, the tree it
/// belongs to) when it is attached. It returns `false` to cancel the default
/// action of the click.
pub type ClickHandler = Rc<dyn Fn(&mut Document) -> bool>;

/// An element node: tag name, ordered attributes and ordered class set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub classes: IndexSet<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
            classes: IndexSet::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Payload of a node in the document arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
}

/// The host document.
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    location: Option<String>,
    scroll_target: Option<NodeId>,
    counter: BlockCounter,
    listeners: HashMap<NodeId, Vec<ClickHandler>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.arena.len())
            .field("location", &self.location)
            .field("scroll_target", &self.scroll_target)
            .field("counter", &self.counter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Document {
    /// Create an empty document with block numbering starting at zero.
    pub fn new() -> Self {
        Self::with_counter(BlockCounter::new())
    }

    /// Create an empty document drawing block numbers from `counter`.
    pub fn with_counter(counter: BlockCounter) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Element(Element::new("html")));
        let head = arena.new_node(NodeData::Element(Element::new("head")));
        let body = arena.new_node(NodeData::Element(Element::new("body")));
        root.append(head, &mut arena);
        root.append(body, &mut arena);

        Self {
            arena,
            root,
            head,
            body,
            location: None,
            scroll_target: None,
            counter,
            listeners: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---- page state ----------------------------------------------------

    /// Full address of the page, possibly with a `#fragment`.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// The page address without its fragment, or `""` when unknown.
    pub fn base_url(&self) -> &str {
        match self.location.as_deref() {
            Some(location) => location.split('#').next().unwrap_or(""),
            None => "",
        }
    }

    /// The fragment identifier of the page address, if it has one.
    pub fn fragment(&self) -> Option<&str> {
        self.location
            .as_deref()
            .and_then(|location| location.split_once('#'))
            .map(|(_, fragment)| fragment)
    }

    /// Ask the host to bring `node` into view.
    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.scroll_target = Some(node);
    }

    /// The node most recently passed to [`Document::scroll_into_view`].
    pub fn scroll_target(&self) -> Option<NodeId> {
        self.scroll_target
    }

    /// Take the next block number from the document's numbering source.
    pub fn next_block_number(&mut self) -> u64 {
        self.counter.next_number()
    }

    pub fn counter(&self) -> &BlockCounter {
        &self.counter
    }

    // ---- construction and structure ------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(NodeData::Element(Element::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Comment(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    /// Insert `node` immediately before `reference`, detaching it first.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        node.detach(&mut self.arena);
        reference.insert_before(node, &mut self.arena);
    }

    pub fn detach(&mut self, node: NodeId) {
        node.detach(&mut self.arena);
    }

    /// Detach every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        for child in self.children(node) {
            child.detach(&mut self.arena);
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.arena
            .get(node)
            .filter(|n| !n.is_removed())
            .map(|n| n.get())
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.get(node)? {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.arena.get_mut(node).map(|n| n.get_mut()) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.parent())
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.first_child())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    /// Proper ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.ancestors(&self.arena).skip(1)
    }

    /// `node` and all of its descendants in document order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    /// Nearest element, starting from `node` itself, that satisfies `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        node.ancestors(&self.arena)
            .find(|&n| self.element(n).is_some_and(&pred))
    }

    /// Nearest element, starting from `node` itself, carrying `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.closest(node, |e| e.has_class(class))
    }

    /// First attached element whose `id` equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.element(n).and_then(Element::id) == Some(id))
    }

    /// Elements with the given tag among `scope` and its descendants.
    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| {
                self.tag(n)
                    .is_some_and(|t| t.eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    // ---- attributes and classes ----------------------------------------

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    /// Set an attribute. `class` replaces the class set instead.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            if name == "class" {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                element.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(Element::id)
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attr(node, "id", id);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.shift_remove(class);
        }
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|n| match self.get(n) {
                Some(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ---- events --------------------------------------------------------

    pub fn add_click_listener(&mut self, node: NodeId, handler: ClickHandler) {
        self.listeners.entry(node).or_default().push(handler);
    }

    pub fn has_click_listeners(&self, node: NodeId) -> bool {
        self.listeners.get(&node).is_some_and(|l| !l.is_empty())
    }

    /// Dispatch a click on `node`.
    ///
    /// Every listener runs, in attachment order. Returns `false` if any of
    /// them cancelled the default action.
    pub fn click(&mut self, node: NodeId) -> bool {
        let handlers = self.listeners.get(&node).cloned().unwrap_or_default();
        let mut follow = true;
        for handler in handlers {
            follow &= (*handler)(self);
        }
        follow
    }
}
