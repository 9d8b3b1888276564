//! Format trait and implementations for the markup produced by document conversion.
//!
//! This module defines the `Format` trait which abstracts over markup dialects by providing the
//! tree-sitter grammar and queries needed to walk converted documents.

pub mod html;

/// Tree-sitter grammar and queries describing one markup dialect.
pub trait Format {
    /// Grammar used to parse markup in this format.
    fn language(&self) -> tree_sitter::Language;
    /// Node kind of a markup element.
    fn element_kind(&self) -> &str;
    /// Query capturing `@tag`, `@attr` and `@value` for every element attribute.
    fn attribute_query(&self) -> &str;
}
