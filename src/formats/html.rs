//! HTML format implementation using tree-sitter-html.
//!
//! Converted documents are HTML fragments: a flat run of headings, paragraphs, lists and tables.
//! Void elements such as `<img>` may appear either self-closed or bare, so the attribute query
//! covers both tag shapes.

use crate::formats::Format;

/// Tree-sitter queries for HTML element attributes.
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_html::LANGUAGE.into()
    }

    fn element_kind(&self) -> &'static str {
        "element"
    }

    fn attribute_query(&self) -> &'static str {
        r"
        (start_tag
          (tag_name) @tag
          (attribute
            (attribute_name) @attr
            [(attribute_value) @value (quoted_attribute_value (attribute_value) @value)]))
        (self_closing_tag
          (tag_name) @tag
          (attribute
            (attribute_name) @attr
            [(attribute_value) @value (quoted_attribute_value (attribute_value) @value)]))
        "
    }
}
