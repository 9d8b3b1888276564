//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a doccards.toml, and if present we load settings from there.
//! This provides the default heading levels, accepted file extensions and text wrapping.

use crate::error::Result;
use crate::section::{HeadingLevel, HeadingPair};
use facet::Facet;
use log::warn;
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "doccards.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from doccards.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "h1".to_string())]
    /// Heading level labelling the broad topic of each card.
    pub parent_header: String,
    #[facet(default = "h2".to_string())]
    /// Heading level that opens a new card.
    pub section_header: String,
    #[facet(default = vec!["docx".to_string()])]
    /// File suffixes accepted when opening a document.
    pub file_extensions: Vec<String>,
    #[facet(default = true)]
    /// Wrap card text to the terminal width.
    pub wrap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parent_header: "h1".to_string(),
            section_header: "h2".to_string(),
            file_extensions: vec!["docx".to_string()],
            wrap: true,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from doccards.toml in the working directory if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// The configured heading levels, validated against the selector choices.
    ///
    /// # Errors
    ///
    /// Returns an error if either level is not an offered choice or both are the same.
    pub fn headings(&self) -> Result<HeadingPair> {
        HeadingPair::new(
            HeadingLevel::parse_parent(&self.parent_header)?,
            HeadingLevel::parse_node(&self.section_header)?,
        )
    }

    #[must_use]
    /// Whether `path` carries one of the accepted extensions, compared case-insensitively.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
