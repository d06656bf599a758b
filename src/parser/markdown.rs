//! Event-stream to DOM translation.

use crate::dom::Document;
use crate::parser::content::SlugRegistry;
use indextree::NodeId;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::{debug, trace};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Render `content` as children of `region`.
pub(crate) fn render_into(doc: &mut Document, region: NodeId, content: &str) {
    let mut builder = DomBuilder::new(doc, region);
    for event in Parser::new_ext(content, options()) {
        builder.event(event);
    }
    debug!(headings = builder.headings, "rendered markdown");
}

struct DomBuilder<'d> {
    doc: &'d mut Document,
    /// Open elements, innermost last.
    stack: Vec<NodeId>,
    /// How many stack entries each open tag pushed.
    frames: Vec<usize>,
    /// Elements opened by raw HTML whose end tag has not been seen yet.
    raw_open: Vec<NodeId>,
    /// Raw HTML of the block being read.
    html_block: Option<String>,
    slugs: SlugRegistry,
    in_table_head: bool,
    headings: usize,
}

impl<'d> DomBuilder<'d> {
    fn new(doc: &'d mut Document, region: NodeId) -> Self {
        Self {
            doc,
            stack: vec![region],
            frames: Vec::new(),
            raw_open: Vec::new(),
            html_block: None,
            slugs: SlugRegistry::new(),
            in_table_head: false,
            headings: 0,
        }
    }

    fn current(&self) -> NodeId {
        // The region is never popped.
        self.stack[self.stack.len() - 1]
    }

    fn open(&mut self, tag: &str) -> NodeId {
        let node = self.doc.create_element(tag);
        let parent = self.current();
        self.doc.append(parent, node);
        self.stack.push(node);
        node
    }

    fn text(&mut self, text: &str) {
        let node = self.doc.create_text(text);
        let parent = self.current();
        self.doc.append(parent, node);
    }

    fn leaf(&mut self, tag: &str) -> NodeId {
        let node = self.doc.create_element(tag);
        let parent = self.current();
        self.doc.append(parent, node);
        node
    }

    /// Parse raw HTML into the current element.
    ///
    /// An element the source leaves open (`<sub>` before its text, a
    /// `<details>` block before its markdown body) stays open and collects
    /// what follows until its end tag arrives.
    fn raw_html(&mut self, html: &str) {
        if let Some(tag) = end_tag_name(html) {
            self.close_raw(&tag);
            return;
        }

        let parent = self.current();
        let nodes = self.doc.parse_fragment(html);
        for &node in &nodes {
            self.doc.append(parent, node);
        }

        let Some(&last) = nodes.last() else {
            return;
        };
        let Some(tag) = self.doc.tag(last).map(str::to_string) else {
            return;
        };
        let end_tag = format!("</{}>", tag);
        let is_void = !self.doc.outer_html(last).ends_with(&end_tag);
        let closed_in_source = html.to_ascii_lowercase().contains(&format!("</{}", tag));
        if !is_void && !closed_in_source && !html.trim_end().ends_with("/>") {
            self.stack.push(last);
            self.raw_open.push(last);
        }
    }

    fn close_raw(&mut self, tag: &str) {
        match self.raw_open.last() {
            Some(&node) if node == self.current() && self.doc.tag(node) == Some(tag) => {
                self.raw_open.pop();
                self.stack.pop();
            }
            _ => trace!(tag, "unmatched raw end tag"),
        }
    }

    fn close_raw_on_top(&mut self) {
        while let Some(&node) = self.raw_open.last() {
            if node != self.current() {
                break;
            }
            self.raw_open.pop();
            self.stack.pop();
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => {
                let before = self.stack.len();
                self.start(tag);
                self.frames.push(self.stack.len() - before);
            }
            Event::End(tag) => self.end(tag),
            Event::Text(s) => self.text(&s),
            Event::Code(s) | Event::InlineMath(s) | Event::DisplayMath(s) => {
                let code = self.leaf("code");
                let text = self.doc.create_text(&s);
                self.doc.append(code, text);
            }
            Event::Html(s) => {
                if let Some(block) = self.html_block.as_mut() {
                    block.push_str(&s);
                } else {
                    self.raw_html(&s);
                }
            }
            Event::InlineHtml(s) => self.raw_html(&s),
            Event::FootnoteReference(name) => {
                let sup = self.leaf("sup");
                let link = self.doc.create_element("a");
                self.doc.set_attr(link, "href", &format!("#fn-{}", name));
                let text = self.doc.create_text(&name);
                self.doc.append(link, text);
                self.doc.append(sup, link);
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => {
                self.leaf("br");
            }
            Event::Rule => {
                self.leaf("hr");
            }
            Event::TaskListMarker(checked) => {
                let input = self.leaf("input");
                self.doc.set_attr(input, "type", "checkbox");
                self.doc.set_attr(input, "disabled", "");
                if checked {
                    self.doc.set_attr(input, "checked", "");
                }
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.open("p");
            }
            Tag::Heading { level, id, classes, .. } => {
                let node = self.open(heading_tag(level));
                if let Some(id) = id {
                    self.slugs.reserve(&id);
                    self.doc.set_id(node, &id);
                }
                for class in classes {
                    self.doc.add_class(node, &class);
                }
            }
            Tag::BlockQuote(_) => {
                self.open("blockquote");
            }
            Tag::CodeBlock(kind) => {
                self.open("pre");
                let code = self.open("code");
                if let CodeBlockKind::Fenced(lang) = kind {
                    let lang = lang.split_whitespace().next().unwrap_or_default();
                    if !lang.is_empty() {
                        self.doc.add_class(code, &format!("language-{}", lang));
                    }
                }
            }
            Tag::HtmlBlock => {
                self.html_block = Some(String::new());
            }
            Tag::List(Some(start)) => {
                let list = self.open("ol");
                if start != 1 {
                    self.doc.set_attr(list, "start", &start.to_string());
                }
            }
            Tag::List(None) => {
                self.open("ul");
            }
            Tag::Item => {
                self.open("li");
            }
            Tag::FootnoteDefinition(name) => {
                let node = self.open("div");
                self.doc.set_id(node, &format!("fn-{}", name));
                self.doc.add_class(node, "footnote-definition");
            }
            Tag::DefinitionList => {
                self.open("dl");
            }
            Tag::DefinitionListTitle => {
                self.open("dt");
            }
            Tag::DefinitionListDefinition => {
                self.open("dd");
            }
            Tag::Table(_) => {
                self.open("table");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.open("thead");
                self.open("tr");
            }
            Tag::TableRow => {
                self.open("tr");
            }
            Tag::TableCell => {
                self.open(if self.in_table_head { "th" } else { "td" });
            }
            Tag::Emphasis => {
                self.open("em");
            }
            Tag::Strong => {
                self.open("strong");
            }
            Tag::Strikethrough => {
                self.open("del");
            }
            Tag::Superscript => {
                self.open("sup");
            }
            Tag::Subscript => {
                self.open("sub");
            }
            Tag::Link { dest_url, title, .. } => {
                let link = self.open("a");
                self.doc.set_attr(link, "href", &dest_url);
                if !title.is_empty() {
                    self.doc.set_attr(link, "title", &title);
                }
            }
            Tag::Image { dest_url, title, .. } => {
                let img = self.open("img");
                self.doc.set_attr(img, "src", &dest_url);
                if !title.is_empty() {
                    self.doc.set_attr(img, "title", &title);
                }
            }
            Tag::MetadataBlock(_) => {
                // Collected into a detached node and dropped.
                let node = self.doc.create_element("div");
                self.stack.push(node);
            }
            #[allow(unreachable_patterns)]
            _ => {
                self.open("div");
            }
        }
    }

    fn end(&mut self, tag: TagEnd) {
        // Raw HTML blocks may span several markdown blocks, as in
        // `<details>` ... `</details>`.
        if !matches!(tag, TagEnd::HtmlBlock) {
            self.close_raw_on_top();
        }
        let node = self.current();
        let pushed = self.frames.pop().unwrap_or(0);
        for _ in 0..pushed {
            if self.stack.len() > 1 {
                self.stack.pop();
            }
        }

        match tag {
            TagEnd::Heading(_) => {
                self.headings += 1;
                if self.doc.id(node).is_none() {
                    let text = self.doc.text_content(node);
                    if let Some(slug) = self.slugs.unique(&text) {
                        self.doc.set_id(node, &slug);
                    }
                }
            }
            TagEnd::TableHead => self.in_table_head = false,
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html_block.take() {
                    self.raw_html(&html);
                }
            }
            TagEnd::Image => {
                let alt = self.doc.text_content(node);
                self.doc.clear_children(node);
                self.doc.set_attr(node, "alt", &alt);
            }
            _ => {}
        }
    }
}

/// The lowercase name of a lone end tag such as `</sub>`.
fn end_tag_name(html: &str) -> Option<String> {
    let name = html.trim().strip_prefix("</")?.strip_suffix('>')?.trim();
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(name.to_ascii_lowercase())
    } else {
        None
    }
}
