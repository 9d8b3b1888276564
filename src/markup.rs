//! Reading converted markup: top-level elements for segmentation, plain text for the terminal.
//!
//! Markup is parsed with tree-sitter rather than a DOM, so we only ever look at the syntax tree:
//! the children of the document root are the flat element run that segmentation walks, and the
//! attribute query digs out the first image inside each of them.

use crate::error::{Error, Result};
use crate::formats::html::HtmlFormat;
use crate::formats::Format;
use std::borrow::Cow;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "tr", "table", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One top-level markup element.
pub struct Element {
    /// Lowercase tag name, e.g. `h2` or `p`.
    pub tag: String,
    /// Raw markup between the element's start and end tags.
    pub inner: String,
    /// Source of the first `<img>` nested inside the element, if any.
    pub image_src: Option<String>,
}

/// Parses markup fragments with a reusable tree-sitter parser.
pub struct MarkupReader {
    parser: Parser,
    attributes: Query,
    element_kind: String,
    tag_capture: u32,
    attr_capture: u32,
    value_capture: u32,
}

impl MarkupReader {
    /// Creates a reader for HTML markup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Markup`] if the grammar or its queries fail to load.
    pub fn new() -> Result<Self> {
        Self::with_format(&HtmlFormat)
    }

    /// Creates a reader for any markup format with the required queries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Markup`] if the grammar or its queries fail to load.
    pub fn with_format(format: &impl Format) -> Result<Self> {
        let language = format.language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| Error::Markup(e.to_string()))?;
        let attributes = Query::new(&language, format.attribute_query())
            .map_err(|e| Error::Markup(e.to_string()))?;
        let capture = |name: &str| {
            attributes
                .capture_index_for_name(name)
                .ok_or_else(|| Error::Markup(format!("attribute query lacks @{name}")))
        };
        let tag_capture = capture("tag")?;
        let attr_capture = capture("attr")?;
        let value_capture = capture("value")?;

        Ok(Self {
            parser,
            attributes,
            element_kind: format.element_kind().to_string(),
            tag_capture,
            attr_capture,
            value_capture,
        })
    }

    fn parse(&mut self, markup: &str) -> Result<Tree> {
        self.parser
            .parse(markup, None)
            .ok_or_else(|| Error::Markup("parser returned no tree".to_string()))
    }

    /// Splits markup into its top-level elements, in document order.
    ///
    /// Text, comments and doctype nodes sitting directly at the top level are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Markup`] if the markup cannot be parsed.
    pub fn parse_elements(&mut self, markup: &str) -> Result<Vec<Element>> {
        let tree = self.parse(markup)?;
        let root = tree.root_node();
        let source = markup.as_bytes();

        let mut elements = Vec::new();
        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            if node.kind() != self.element_kind {
                continue;
            }
            let Some(tag) = tag_name(node, source) else {
                continue;
            };
            elements.push(Element {
                tag,
                inner: inner_markup(node, markup).to_string(),
                image_src: self.first_image_src(node, source),
            });
        }
        Ok(elements)
    }

    fn first_image_src(&self, element: Node, source: &[u8]) -> Option<String> {
        let mut query_cursor = QueryCursor::new();
        let mut matches = query_cursor.matches(&self.attributes, element, source);
        let mut first: Option<(usize, String)> = None;

        while let Some(m) = matches.next() {
            let mut tag = None;
            let mut attr = None;
            let mut value = None;
            for capture in m.captures {
                if capture.index == self.tag_capture {
                    tag = Some(capture.node);
                } else if capture.index == self.attr_capture {
                    attr = capture.node.utf8_text(source).ok();
                } else if capture.index == self.value_capture {
                    value = capture.node.utf8_text(source).ok();
                }
            }
            let (Some(tag), Some(attr), Some(value)) = (tag, attr, value) else {
                continue;
            };
            // The element's own tag does not count, only images nested inside it.
            if tag.start_byte() <= element.start_byte() + 1 {
                continue;
            }
            let is_img = tag
                .utf8_text(source)
                .is_ok_and(|t| t.eq_ignore_ascii_case("img"));
            if !is_img || !attr.eq_ignore_ascii_case("src") {
                continue;
            }
            if first.as_ref().is_none_or(|(start, _)| tag.start_byte() < *start) {
                first = Some((tag.start_byte(), decode_entities(value).into_owned()));
            }
        }

        first.map(|(_, src)| src)
    }

    /// Renders a markup fragment as plain text lines for the terminal.
    ///
    /// Block elements and `<br>` start new lines, list items get a bullet, table cells are joined
    /// with `|`, and images are shown as an `[image]` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Markup`] if the fragment cannot be parsed.
    pub fn to_text_lines(&mut self, fragment: &str) -> Result<Vec<String>> {
        let tree = self.parse(fragment)?;
        let mut text = TextCollector::default();
        text.walk(tree.root_node(), fragment.as_bytes());
        Ok(text.finish())
    }
}

fn tag_name(element: Node, source: &[u8]) -> Option<String> {
    let mut cursor = element.walk();
    let tag = element
        .children(&mut cursor)
        .find(|c| c.kind() == "start_tag" || c.kind() == "self_closing_tag")?;
    let mut tag_cursor = tag.walk();
    let name = tag
        .children(&mut tag_cursor)
        .find(|c| c.kind() == "tag_name")?;
    name.utf8_text(source).ok().map(str::to_ascii_lowercase)
}

fn inner_markup<'a>(element: Node, markup: &'a str) -> &'a str {
    let mut start = None;
    let mut end = element.end_byte();
    let mut cursor = element.walk();
    for child in element.children(&mut cursor) {
        match child.kind() {
            "start_tag" => start = Some(child.end_byte()),
            "end_tag" => end = child.start_byte(),
            _ => {}
        }
    }
    match start {
        Some(start) if start <= end => &markup[start..end],
        _ => "",
    }
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let text = text.replace("&nbsp;", " ");
    match quick_xml::escape::unescape(&text) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(text),
    }
}

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    current: String,
}

impl TextCollector {
    fn push_str(&mut self, text: &str) {
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            self.current.push_str(piece);
        }
    }

    fn push_space(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line.trim_end().to_string());
    }

    fn end_block(&mut self) {
        if !self.current.trim().is_empty() {
            self.break_line();
        } else {
            self.current.clear();
        }
    }

    fn walk(&mut self, node: Node, source: &[u8]) {
        match node.kind() {
            "text" | "entity" => {
                let raw = node.utf8_text(source).unwrap_or_default();
                self.push_str(&decode_entities(raw));
            }
            "start_tag" | "end_tag" | "self_closing_tag" | "comment" | "doctype" => {}
            "element" => {
                let tag = tag_name(node, source).unwrap_or_default();
                match tag.as_str() {
                    "br" => self.break_line(),
                    "img" => {
                        self.push_space();
                        self.push_str("[image]");
                    }
                    "td" | "th" => {
                        if !self.current.is_empty() {
                            self.push_str(" | ");
                        }
                        self.walk_children(node, source);
                    }
                    _ if BLOCK_TAGS.contains(&tag.as_str()) => {
                        self.end_block();
                        if tag == "li" {
                            self.push_str("• ");
                        }
                        self.walk_children(node, source);
                        self.end_block();
                    }
                    _ => self.walk_children(node, source),
                }
            }
            _ => self.walk_children(node, source),
        }
    }

    fn walk_children(&mut self, node: Node, source: &[u8]) {
        let mut previous_end = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            // Whitespace between tokens is not part of any text node.
            if let Some(end) = previous_end {
                let gap = &source[end..child.start_byte()];
                if gap.iter().any(u8::is_ascii_whitespace) {
                    self.push_space();
                }
            }
            self.walk(child, source);
            previous_end = Some(child.end_byte());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.end_block();
        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
#[path = "tests/markup.rs"]
mod tests;
