//! Error types surfaced to the presentation layer.
//!
//! Every failure while loading a document is scoped to the current session: the controller turns
//! these into a status message and stays on the setup screen rather than aborting.

use crate::section::HeadingLevel;
use std::io;
use std::path::PathBuf;

/// Result type alias for doccards operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
/// Reasons a document could not be turned into study cards.
pub enum Error {
    /// The document file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The document is not a readable word-processor archive.
    #[error("could not convert document: {0}")]
    Conversion(String),

    /// The converted markup could not be parsed into elements.
    #[error("could not parse document markup: {0}")]
    Markup(String),

    /// Segmentation produced no cards for the chosen heading levels.
    #[error("no cards found using {parent} as parent and {node} as node heading")]
    NoSections {
        /// Parent heading level in effect.
        parent: HeadingLevel,
        /// Node heading level in effect.
        node: HeadingLevel,
    },

    /// The selected file does not carry an accepted extension.
    #[error("{path} is not one of: {}", allowed.join(", "))]
    UnsupportedExtension {
        /// Rejected file path.
        path: PathBuf,
        /// Extensions accepted by the current configuration.
        allowed: Vec<String>,
    },

    /// A heading selector is not one of the accepted levels.
    #[error("invalid heading level {value:?} (expected one of: {})", allowed.join(", "))]
    InvalidHeading {
        /// Value that failed to parse.
        value: String,
        /// Levels accepted for this selector.
        allowed: Vec<String>,
    },

    /// Parent and node selectors name the same heading level.
    #[error("parent and node heading must differ (both are {0})")]
    SameHeadingLevels(HeadingLevel),
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Conversion(e.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Conversion(format!("XML parse error: {e}"))
    }
}
