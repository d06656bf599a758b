//! Wiring the tree for interaction.
//!
//! [`TreeOfContents::initialize`] runs the whole pipeline on a content region
//! and attaches click listeners; [`TreeOfContents::activate_link`] and
//! [`TreeOfContents::resolve_fragment`] keep exactly one block visible and its
//! branch of the tree open.

use crate::dom::Document;
use crate::error::TocError;
use crate::toc::builder::TreeBuilder;
use crate::toc::classify::{DepthOrder, HeadingKind, scan_headings};
use crate::toc::outline::{OutlineNode, read_outline};
use crate::toc::partition::partition;
use crate::toc::{
    ATTR_LINK_SECTION, ATTR_LINK_TREE, CLASS_BLOCK, CLASS_CURRENT, CLASS_HIDDEN, CLASS_TOC,
    CLASS_VISITED, LINK_PREFIX,
};
use indextree::NodeId;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use url::Url;

/// Options for [`TreeOfContents::initialize`].
#[derive(Debug, Clone, Default)]
pub struct TocOptions {
    /// Recognized heading kinds, shallowest first. Defaults to `h1`..`h6`.
    pub headings: Option<Vec<HeadingKind>>,
    /// Existing element to host the tree. Created when absent.
    pub container: Option<NodeId>,
}

/// One heading's link and block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub block_id: String,
    pub link: NodeId,
    pub block: NodeId,
}

/// A built tree of contents and the content region it manages.
#[derive(Debug, Clone)]
pub struct TreeOfContents {
    container: NodeId,
    region: NodeId,
    root_list: NodeId,
    entries: Vec<TocEntry>,
}

impl TreeOfContents {
    /// Build a tree of contents for `region`.
    ///
    /// Returns `Ok(None)` without touching the document when the region is
    /// absent or holds no recognized heading. Calling this again, on the same
    /// region or another one, builds a second independent tree; block ids
    /// never overlap because both draw from the document's counter.
    ///
    /// When the page location carries a fragment, it is resolved once the
    /// tree is ready.
    pub fn initialize(
        doc: &mut Document,
        region: Option<NodeId>,
        options: &TocOptions,
    ) -> Result<Option<Self>, TocError> {
        let Some(region) = region else {
            debug!("no content region, nothing to build");
            return Ok(None);
        };
        if !doc.is_element(region) {
            return Err(TocError::NotAnElement(region));
        }
        if let Some(container) = options.container {
            if !doc.is_element(container) {
                return Err(TocError::NotAnElement(container));
            }
        }

        let recognized = options.headings.clone().unwrap_or_else(HeadingKind::all);
        let markers = scan_headings(doc, region, &recognized);
        if markers.is_empty() {
            debug!("no headings in content region, nothing to build");
            return Ok(None);
        }
        let order = DepthOrder::classify(&markers, &recognized);

        Self::instrument_links(doc);

        let container = match options.container {
            Some(container) => container,
            None => {
                let container = doc.create_element("div");
                match doc.parent(region) {
                    Some(_) => doc.insert_before(region, container),
                    None => {
                        let body = doc.body();
                        doc.append(body, container);
                    }
                }
                container
            }
        };
        if doc.id(container).is_none_or(str::is_empty) {
            let base = format!("{}-{}", CLASS_TOC, doc.id(region).unwrap_or_default());
            let id = unique_id(doc, &base);
            doc.set_id(container, &id);
        }
        doc.add_class(container, CLASS_TOC);
        let container_id = doc.id(container).unwrap_or_default().to_string();

        let Some(built) = TreeBuilder::new(doc, &order, &container_id).build(&markers) else {
            return Ok(None);
        };
        doc.append(container, built.root_list);

        let blocks = partition(doc, &built.partitions);
        for block in &blocks {
            doc.add_class(block.node, CLASS_HIDDEN);
        }

        let mut entries = Vec::with_capacity(built.links.len());
        for (link, block) in built.links.iter().zip(&blocks) {
            let link = *link;
            doc.add_click_listener(
                link,
                Rc::new(move |doc: &mut Document| {
                    Self::activate_link(doc, link);
                    true
                }),
            );
            entries.push(TocEntry {
                block_id: block.block_id.clone(),
                link,
                block: block.node,
            });
        }
        debug!(container = %container_id, entries = entries.len(), "tree of contents ready");

        let toc = Self {
            container,
            region,
            root_list: built.root_list,
            entries,
        };

        if let Some(location) = doc.location().filter(|l| l.contains('#')).map(str::to_string) {
            Self::resolve_fragment(doc, &location, true);
        }
        Ok(Some(toc))
    }

    /// Select `link`: open its branch, show its block and hide the other
    /// blocks of the same tree, then mark it current and visited.
    ///
    /// Returns `false` if the link does not target an existing block.
    pub fn activate_link(doc: &mut Document, link: NodeId) -> bool {
        Self::expand_branch(doc, link);

        let Some(block) = doc
            .attr(link, ATTR_LINK_SECTION)
            .and_then(|id| doc.get_element_by_id(id))
        else {
            warn!(?link, "link does not target a content block");
            return false;
        };
        let tree = doc
            .attr(link, ATTR_LINK_TREE)
            .and_then(|id| doc.get_element_by_id(id));

        let tree_links = tree.map(|tree| doc.elements_by_tag(tree, "a"));
        let to_hide: Vec<NodeId> = match &tree_links {
            Some(links) => links
                .iter()
                .filter_map(|&l| doc.attr(l, ATTR_LINK_SECTION))
                .filter_map(|id| doc.get_element_by_id(id))
                .collect(),
            None => doc
                .parent(block)
                .map(|region| doc.children(region))
                .unwrap_or_default()
                .into_iter()
                .filter(|&n| doc.has_class(n, CLASS_BLOCK))
                .collect(),
        };
        for node in to_hide {
            doc.add_class(node, CLASS_HIDDEN);
        }
        doc.remove_class(block, CLASS_HIDDEN);
        // The region itself may start hidden; the page above it is not ours.
        if let Some(region) = doc.parent(block) {
            doc.remove_class(region, CLASS_HIDDEN);
        }

        for other in tree_links.unwrap_or_else(|| vec![link]) {
            if other == link {
                doc.add_class(other, CLASS_CURRENT);
                doc.add_class(other, CLASS_VISITED);
            } else {
                doc.remove_class(other, CLASS_CURRENT);
            }
        }
        debug!(block = ?doc.id(block), "activated content block");
        true
    }

    /// Reveal the block containing the element a fragment points at.
    ///
    /// `href` may be a bare id, `#id`, or a full address ending in `#id`.
    /// When the target sits inside a hidden block, that block's link is
    /// clicked, and with `force_reveal` the target is scrolled into view.
    /// Always returns `true` so the host carries on with its own
    /// navigation.
    pub fn resolve_fragment(doc: &mut Document, href: &str, force_reveal: bool) -> bool {
        let fragment = match href.split_once('#') {
            Some((_, fragment)) => fragment,
            None => href,
        };
        if fragment.is_empty() {
            return true;
        }
        let Some(target) = doc.get_element_by_id(fragment) else {
            trace!(fragment, "fragment does not match any element");
            return true;
        };
        let Some(block) = doc.closest_with_class(target, CLASS_BLOCK) else {
            return true;
        };
        if doc.closest_with_class(block, CLASS_HIDDEN).is_none() {
            return true;
        }

        let link_id = format!("{}{}", LINK_PREFIX, doc.id(block).unwrap_or_default());
        if let Some(link) = doc.get_element_by_id(&link_id) {
            doc.click(link);
        }
        if force_reveal {
            doc.scroll_into_view(target);
        }
        debug!(fragment, "resolved fragment");
        true
    }

    /// Route clicks on in-document links through
    /// [`TreeOfContents::resolve_fragment`].
    ///
    /// A link qualifies when its `href` is a bare fragment or, resolved
    /// against the page address, starts with the page's base address. Links that already have listeners are left
    /// alone, so instrumenting twice is harmless.
    pub fn instrument_links(doc: &mut Document) {
        let base = doc.base_url().to_string();
        let root = doc.root();
        for link in doc.elements_by_tag(root, "a") {
            if doc.has_click_listeners(link) {
                continue;
            }
            let Some(href) = doc.attr(link, "href") else {
                continue;
            };
            if !is_document_link(href, &base) {
                continue;
            }
            doc.add_click_listener(
                link,
                Rc::new(move |doc: &mut Document| {
                    let href = doc.attr(link, "href").unwrap_or_default().to_string();
                    Self::resolve_fragment(doc, &href, false)
                }),
            );
        }
    }

    /// Open every collapsible group enclosing `link`.
    pub fn expand_branch(doc: &mut Document, link: NodeId) {
        let groups: Vec<NodeId> = doc
            .ancestors(link)
            .filter(|&n| doc.tag(n) == Some("details"))
            .collect();
        for group in groups {
            doc.set_attr(group, "open", "");
        }
    }

    /// Click the link of `block_id`, as a user would.
    pub fn activate(&self, doc: &mut Document, block_id: &str) -> bool {
        match self.entry(block_id) {
            Some(entry) => {
                let link = entry.link;
                doc.click(link);
                true
            }
            None => false,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn region(&self) -> NodeId {
        self.region
    }

    pub fn root_list(&self) -> NodeId {
        self.root_list
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn entry(&self, block_id: &str) -> Option<&TocEntry> {
        self.entries.iter().find(|e| e.block_id == block_id)
    }

    pub fn block_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.block_id.as_str()).collect()
    }

    /// The block currently shown, if any.
    pub fn visible_block(&self, doc: &Document) -> Option<&TocEntry> {
        self.entries
            .iter()
            .find(|e| doc.closest_with_class(e.block, CLASS_HIDDEN).is_none())
    }

    /// The entry whose link is marked current, if any.
    pub fn current(&self, doc: &Document) -> Option<&TocEntry> {
        self.entries
            .iter()
            .find(|e| doc.has_class(e.link, CLASS_CURRENT))
    }

    /// The tree read back as typed outline nodes.
    pub fn outline(&self, doc: &Document) -> Vec<OutlineNode> {
        read_outline(doc, self.root_list, 0)
    }
}

fn is_document_link(href: &str, base: &str) -> bool {
    if href.starts_with('#') {
        return true;
    }
    if base.is_empty() {
        return false;
    }
    match Url::parse(base) {
        Ok(base) => base
            .join(href)
            .is_ok_and(|resolved| resolved.as_str().starts_with(base.as_str())),
        Err(err) => {
            trace!(%err, base, "page address is not a url");
            href.starts_with(base)
        }
    }
}

/// `base`, or `base-2`, `base-3`, ... if that id is taken.
fn unique_id(doc: &Document, base: &str) -> String {
    if doc.get_element_by_id(base).is_none() {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|id| doc.get_element_by_id(id).is_none())
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::BlockCounter;

    struct Page {
        doc: Document,
        region: NodeId,
    }

    /// A page with `<div id="content">` holding the given `(tag, text)`
    /// elements. Headings get an id equal to their lowercased text.
    fn page(items: &[(&str, &str)]) -> Page {
        let mut doc = Document::new();
        let region = doc.create_element("div");
        doc.set_id(region, "content");
        let body = doc.body();
        doc.append(body, region);
        for (tag, text) in items {
            let node = doc.create_element(tag);
            if HeadingKind::from_tag(tag).is_some() {
                doc.set_id(node, &text.to_lowercase());
            }
            let text_node = doc.create_text(text);
            doc.append(node, text_node);
            doc.append(region, node);
        }
        Page { doc, region }
    }

    fn init(page: &mut Page) -> TreeOfContents {
        TreeOfContents::initialize(&mut page.doc, Some(page.region), &TocOptions::default())
            .unwrap()
            .unwrap()
    }

    fn sample() -> Page {
        page(&[
            ("h1", "Intro"),
            ("p", "welcome"),
            ("h2", "Background"),
            ("p", "history"),
            ("span", "detail"),
            ("h1", "Methods"),
            ("p", "steps"),
        ])
    }

    fn hidden_count(doc: &Document, toc: &TreeOfContents) -> usize {
        toc.entries()
            .iter()
            .filter(|e| doc.has_class(e.block, CLASS_HIDDEN))
            .count()
    }

    #[test]
    fn test_initialize_builds_container_before_region() {
        let mut page = sample();
        let toc = init(&mut page);

        let body = page.doc.body();
        assert_eq!(page.doc.children(body), vec![toc.container(), page.region]);
        assert_eq!(page.doc.id(toc.container()), Some("tree-of-contents-content"));
        assert!(page.doc.has_class(toc.container(), CLASS_TOC));
        assert_eq!(toc.block_ids(), vec!["toc-block0", "toc-block1", "toc-block2"]);
    }

    #[test]
    fn test_initial_state_has_no_selection() {
        let mut page = sample();
        let toc = init(&mut page);

        assert_eq!(hidden_count(&page.doc, &toc), 3);
        assert!(toc.visible_block(&page.doc).is_none());
        assert!(toc.current(&page.doc).is_none());
    }

    #[test]
    fn test_every_node_has_one_block_and_one_link() {
        let mut page = sample();
        let toc = init(&mut page);

        for entry in toc.entries() {
            assert_eq!(page.doc.id(entry.block), Some(entry.block_id.as_str()));
            assert_eq!(
                page.doc.id(entry.link),
                Some(format!("link-{}", entry.block_id).as_str())
            );
            assert_eq!(
                page.doc.attr(entry.link, ATTR_LINK_SECTION),
                Some(entry.block_id.as_str())
            );
            assert_eq!(
                page.doc.attr(entry.link, ATTR_LINK_TREE),
                Some("tree-of-contents-content")
            );
        }
    }

    #[test]
    fn test_activation_keeps_single_visible_block() {
        let mut page = sample();
        let toc = init(&mut page);

        for block_id in ["toc-block1", "toc-block0", "toc-block2", "toc-block2"] {
            assert!(toc.activate(&mut page.doc, block_id));
            assert_eq!(hidden_count(&page.doc, &toc), 2);
            assert_eq!(
                toc.visible_block(&page.doc).map(|e| e.block_id.as_str()),
                Some(block_id)
            );
        }
    }

    #[test]
    fn test_current_and_visited_markings() {
        let mut page = sample();
        let toc = init(&mut page);
        let links: Vec<NodeId> = toc.entries().iter().map(|e| e.link).collect();

        toc.activate(&mut page.doc, "toc-block0");
        toc.activate(&mut page.doc, "toc-block2");

        let doc = &page.doc;
        assert!(doc.has_class(links[2], CLASS_CURRENT));
        assert!(doc.has_class(links[2], CLASS_VISITED));
        assert!(!doc.has_class(links[0], CLASS_CURRENT));
        assert!(doc.has_class(links[0], CLASS_VISITED));
        assert!(!doc.has_class(links[1], CLASS_CURRENT));
        assert!(!doc.has_class(links[1], CLASS_VISITED));
    }

    #[test]
    fn test_activation_opens_ancestor_groups() {
        let mut page = page(&[("h1", "A"), ("h2", "B"), ("h3", "C"), ("h1", "D")]);
        let toc = init(&mut page);

        toc.activate(&mut page.doc, "toc-block2");

        let link = toc.entry("toc-block2").unwrap().link;
        let groups: Vec<NodeId> = page
            .doc
            .ancestors(link)
            .filter(|&n| page.doc.tag(n) == Some("details"))
            .collect();
        assert_eq!(groups.len(), 2);
        for group in groups {
            assert_eq!(page.doc.attr(group, "open"), Some(""));
        }
    }

    #[test]
    fn test_fragment_reveals_enclosing_block() {
        let mut page = page(&[("h1", "Intro"), ("h2", "Background"), ("h1", "Methods")]);
        let note = page.doc.create_element("p");
        page.doc.set_id(note, "note");
        let methods = page.doc.get_element_by_id("methods").unwrap();
        page.doc.insert_before(methods, note);
        let toc = init(&mut page);

        assert!(TreeOfContents::resolve_fragment(&mut page.doc, "#note", false));

        let visible = toc.visible_block(&page.doc).unwrap();
        assert_eq!(page.doc.parent(note), Some(visible.block));
        assert_eq!(visible.block_id, "toc-block1");
        assert_eq!(toc.current(&page.doc).unwrap().block_id, "toc-block1");
        assert!(page.doc.has_class(toc.entries()[0].block, CLASS_HIDDEN));
        assert!(page.doc.has_class(toc.entries()[2].block, CLASS_HIDDEN));
        assert_eq!(page.doc.scroll_target(), None);
    }

    #[test]
    fn test_fragment_with_force_reveal_scrolls() {
        let mut page = sample();
        init(&mut page);
        let target = page.doc.get_element_by_id("methods").unwrap();

        TreeOfContents::resolve_fragment(&mut page.doc, "https://example.com/doc#methods", true);
        assert_eq!(page.doc.scroll_target(), Some(target));
    }

    #[test]
    fn test_unresolvable_fragment_still_follows() {
        let mut page = sample();
        let toc = init(&mut page);

        assert!(TreeOfContents::resolve_fragment(&mut page.doc, "#missing", true));
        assert!(TreeOfContents::resolve_fragment(&mut page.doc, "#", true));
        assert!(toc.visible_block(&page.doc).is_none());
        assert_eq!(page.doc.scroll_target(), None);
    }

    #[test]
    fn test_fragment_into_visible_block_is_noop() {
        let mut page = sample();
        let toc = init(&mut page);
        toc.activate(&mut page.doc, "toc-block0");

        assert!(TreeOfContents::resolve_fragment(&mut page.doc, "intro", true));
        assert_eq!(page.doc.scroll_target(), None);
        assert_eq!(toc.current(&page.doc).unwrap().block_id, "toc-block0");
    }

    #[test]
    fn test_location_fragment_is_resolved_on_initialize() {
        let mut page = sample();
        page.doc.set_location("https://example.com/doc.html#background");
        let toc = init(&mut page);

        let target = page.doc.get_element_by_id("background").unwrap();
        assert_eq!(toc.visible_block(&page.doc).unwrap().block_id, "toc-block1");
        assert_eq!(page.doc.scroll_target(), Some(target));
    }

    #[test]
    fn test_document_links_route_through_fragments() {
        let mut page = sample();
        page.doc.set_location("https://example.com/doc.html");
        let local = page.doc.create_element("a");
        page.doc.set_attr(local, "href", "#methods");
        let absolute = page.doc.create_element("a");
        page.doc.set_attr(absolute, "href", "https://example.com/doc.html#background");
        let external = page.doc.create_element("a");
        page.doc.set_attr(external, "href", "https://other.org/#methods");
        let body = page.doc.body();
        for link in [local, absolute, external] {
            page.doc.append(body, link);
        }
        let toc = init(&mut page);

        assert!(page.doc.has_click_listeners(local));
        assert!(page.doc.has_click_listeners(absolute));
        assert!(!page.doc.has_click_listeners(external));

        assert!(page.doc.click(local));
        assert_eq!(toc.visible_block(&page.doc).unwrap().block_id, "toc-block2");

        assert!(page.doc.click(absolute));
        assert_eq!(toc.visible_block(&page.doc).unwrap().block_id, "toc-block1");
    }

    #[test]
    fn test_relative_links_resolve_against_page_address() {
        assert!(is_document_link("doc.html#x", "https://example.com/docs/doc.html"));
        assert!(is_document_link("/docs/doc.html#x", "https://example.com/docs/doc.html"));
        assert!(is_document_link("./doc.html", "https://example.com/docs/doc.html"));
        assert!(!is_document_link("other.html#x", "https://example.com/docs/doc.html"));
        assert!(!is_document_link("https://other.org/docs/doc.html#x", "https://example.com/docs/doc.html"));
        assert!(!is_document_link("doc.html#x", ""));

        let mut page = sample();
        page.doc.set_location("https://example.com/docs/doc.html");
        let relative = page.doc.create_element("a");
        page.doc.set_attr(relative, "href", "doc.html#methods");
        let body = page.doc.body();
        page.doc.append(body, relative);
        let toc = init(&mut page);

        assert!(page.doc.has_click_listeners(relative));
        assert!(page.doc.click(relative));
        assert_eq!(toc.visible_block(&page.doc).unwrap().block_id, "toc-block2");
    }

    #[test]
    fn test_two_trees_never_share_block_ids() {
        let mut doc = Document::with_counter(BlockCounter::starting_at(0));
        let body = doc.body();
        let mut regions = Vec::new();
        for name in ["first", "second"] {
            let region = doc.create_element("div");
            doc.set_id(region, name);
            doc.append(body, region);
            for text in ["A", "B"] {
                let heading = doc.create_element("h2");
                let text = doc.create_text(text);
                doc.append(heading, text);
                doc.append(region, heading);
            }
            regions.push(region);
        }

        let first = TreeOfContents::initialize(&mut doc, Some(regions[0]), &TocOptions::default())
            .unwrap()
            .unwrap();
        let second = TreeOfContents::initialize(&mut doc, Some(regions[1]), &TocOptions::default())
            .unwrap()
            .unwrap();

        for id in first.block_ids() {
            assert!(!second.block_ids().contains(&id));
        }
        assert_ne!(doc.id(first.container()), doc.id(second.container()));

        // Selecting in one tree leaves the other untouched.
        first.activate(&mut doc, "toc-block0");
        second.activate(&mut doc, "toc-block3");
        assert_eq!(first.visible_block(&doc).unwrap().block_id, "toc-block0");
        assert_eq!(second.visible_block(&doc).unwrap().block_id, "toc-block3");
        assert_eq!(first.current(&doc).unwrap().block_id, "toc-block0");
    }

    #[test]
    fn test_same_region_twice_gets_distinct_container() {
        let mut page = sample();
        let first = init(&mut page);
        let second = init(&mut page);

        assert_eq!(page.doc.id(first.container()), Some("tree-of-contents-content"));
        assert_eq!(
            page.doc.id(second.container()),
            Some("tree-of-contents-content-2")
        );
        for id in first.block_ids() {
            assert!(!second.block_ids().contains(&id));
        }
    }

    #[test]
    fn test_empty_region_is_left_untouched() {
        let mut page = page(&[("p", "no headings here")]);
        let before = page.doc.to_html();

        let toc = TreeOfContents::initialize(&mut page.doc, Some(page.region), &TocOptions::default())
            .unwrap();

        assert!(toc.is_none());
        assert_eq!(page.doc.to_html(), before);
        assert!(page.doc.get_element_by_id("tree-of-contents-content").is_none());
    }

    #[test]
    fn test_absent_region_is_noop() {
        let mut doc = Document::new();
        let region = doc.get_element_by_id("content");
        let toc = TreeOfContents::initialize(&mut doc, region, &TocOptions::default()).unwrap();
        assert!(toc.is_none());
    }

    #[test]
    fn test_text_region_is_an_error() {
        let mut doc = Document::new();
        let text = doc.create_text("loose");
        let err = TreeOfContents::initialize(&mut doc, Some(text), &TocOptions::default())
            .unwrap_err();
        assert!(matches!(err, TocError::NotAnElement(node) if node == text));
    }

    #[test]
    fn test_existing_container_keeps_its_id() {
        let mut page = sample();
        let aside = page.doc.create_element("aside");
        page.doc.set_id(aside, "sidebar");
        let body = page.doc.body();
        page.doc.append(body, aside);

        let options = TocOptions {
            headings: Some(vec![HeadingKind::H1]),
            container: Some(aside),
        };
        let toc = TreeOfContents::initialize(&mut page.doc, Some(page.region), &options)
            .unwrap()
            .unwrap();

        assert_eq!(toc.container(), aside);
        assert_eq!(toc.entries().len(), 2);
        let link = toc.entries()[0].link;
        assert_eq!(page.doc.attr(link, ATTR_LINK_TREE), Some("sidebar"));
    }

    #[test]
    fn test_round_trip_through_blocks() {
        let mut page = sample();
        let original = page.doc.inner_html(page.region);
        let toc = init(&mut page);

        let rebuilt: String = toc
            .entries()
            .iter()
            .map(|e| page.doc.inner_html(e.block))
            .collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_showing_a_block_unhides_the_region() {
        let mut page = sample();
        page.doc.add_class(page.region, CLASS_HIDDEN);
        let toc = init(&mut page);

        toc.activate(&mut page.doc, "toc-block1");
        assert!(!page.doc.has_class(page.region, CLASS_HIDDEN));
    }

    #[test]
    fn test_hidden_page_above_region_stays_hidden() {
        let mut page = sample();
        let wrapper = page.doc.create_element("main");
        page.doc.add_class(wrapper, CLASS_HIDDEN);
        let body = page.doc.body();
        page.doc.append(body, wrapper);
        page.doc.append(wrapper, page.region);
        let toc = init(&mut page);

        toc.activate(&mut page.doc, "toc-block0");
        assert_eq!(toc.visible_block(&page.doc), None);
        assert!(!page.doc.has_class(toc.entries()[0].block, CLASS_HIDDEN));
        assert!(page.doc.has_class(wrapper, CLASS_HIDDEN));
    }
}
