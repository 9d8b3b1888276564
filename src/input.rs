//! Document input: reading a file from disk and extracting its sections.
//!
//! This is the whole pipeline from bytes to cards, shared by the TUI and the `--json` export.

use crate::config::Config;
use crate::convert::DocxConverter;
use crate::error::{Error, Result};
use crate::markup::MarkupReader;
use crate::section::{HeadingPair, Section};
use crate::segment::segment;
use log::{debug, info};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Sections extracted from one document.
pub struct Deck {
    /// Document title from the package properties, when set.
    pub title: Option<String>,
    /// Cards in document order.
    pub sections: Vec<Section>,
    /// Non-fatal conversion diagnostics.
    pub messages: Vec<String>,
}

/// Reads a document after checking its extension against the configuration.
///
/// # Errors
///
/// Returns [`Error::UnsupportedExtension`] for filtered-out files and [`Error::Io`] if the file
/// cannot be read.
pub fn read_document(path: &Path, cfg: &Config) -> Result<Vec<u8>> {
    if !cfg.accepts(path) {
        return Err(Error::UnsupportedExtension {
            path: path.to_path_buf(),
            allowed: cfg.file_extensions.clone(),
        });
    }
    fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts document bytes and segments them into cards.
///
/// # Errors
///
/// Returns an error if conversion or markup parsing fails, or [`Error::NoSections`] if the
/// chosen heading levels produce no cards.
pub fn extract_sections(bytes: &[u8], headings: HeadingPair) -> Result<Deck> {
    let conversion = DocxConverter::new().convert(bytes)?;
    for message in &conversion.messages {
        debug!("conversion: {message}");
    }

    let elements = MarkupReader::new()?.parse_elements(&conversion.markup)?;
    let sections = segment(&elements, headings);
    info!(
        "segmented {} elements into {} sections ({} / {})",
        elements.len(),
        sections.len(),
        headings.parent,
        headings.node
    );

    if sections.is_empty() {
        return Err(Error::NoSections {
            parent: headings.parent,
            node: headings.node,
        });
    }

    Ok(Deck {
        title: conversion.title,
        sections,
        messages: conversion.messages,
    })
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
