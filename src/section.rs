//! Section representation for heading-segmented documents.
//!
//! A section is one study card: the broad topic inherited from the nearest parent heading, the
//! node heading that opened it, and the body fragments collected until the next node heading.
//! Fragments are kept as markup so that rendering decides how to present them.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// Stable identifier assigned to each section in document order.
pub struct SectionId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One study card extracted from a document.
pub struct Section {
    /// Position of the section in the segmented document.
    pub id: SectionId,
    /// Markup of the most recent parent heading, empty before the first one.
    pub part: String,
    /// Markup of the node heading that opened this section.
    pub title: String,
    /// Markup fragments following the node heading, in document order.
    pub body: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A document heading level, `h1` through `h6`.
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Top-level heading.
    pub const H1: Self = Self(1);
    /// Second-level heading.
    pub const H2: Self = Self(2);
    /// Third-level heading.
    pub const H3: Self = Self(3);
    /// Fourth-level heading.
    pub const H4: Self = Self(4);

    /// Levels offered for the parent (broad topic) selector.
    pub const PARENT_CHOICES: [Self; 3] = [Self::H1, Self::H2, Self::H3];
    /// Levels offered for the node (card title) selector.
    pub const NODE_CHOICES: [Self; 3] = [Self::H2, Self::H3, Self::H4];

    #[must_use]
    /// Builds a level from its number, if it names a heading.
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    #[must_use]
    /// Numeric depth of the heading.
    pub fn depth(self) -> u8 {
        self.0
    }

    #[must_use]
    /// Lowercase markup tag name for this level, e.g. `h2`.
    pub fn tag(self) -> &'static str {
        match self.0 {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        }
    }

    /// Parses a level restricted to the parent selector choices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeading`] if the value is not an offered parent level.
    pub fn parse_parent(value: &str) -> Result<Self> {
        Self::parse_within(value, &Self::PARENT_CHOICES)
    }

    /// Parses a level restricted to the node selector choices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeading`] if the value is not an offered node level.
    pub fn parse_node(value: &str) -> Result<Self> {
        Self::parse_within(value, &Self::NODE_CHOICES)
    }

    fn parse_within(value: &str, choices: &[Self]) -> Result<Self> {
        let invalid = || Error::InvalidHeading {
            value: value.to_string(),
            allowed: choices.iter().map(ToString::to_string).collect(),
        };
        let level: Self = value.parse().map_err(|_| invalid())?;
        if choices.contains(&level) {
            Ok(level)
        } else {
            Err(invalid())
        }
    }

    #[must_use]
    /// The choice following this one in `choices`, wrapping around.
    pub fn cycle(self, choices: &[Self]) -> Self {
        let position = choices.iter().position(|c| *c == self);
        match position {
            Some(i) => choices[(i + 1) % choices.len()],
            None => choices.first().copied().unwrap_or(self),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_ascii_lowercase();
        trimmed
            .strip_prefix('h')
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidHeading {
                value: s.to_string(),
                allowed: (1..=6).map(|n| format!("h{n}")).collect(),
            })
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The two heading levels that drive segmentation.
///
/// The parent level labels the broad topic carried by every following card; the node level opens
/// a new card. The two must differ, since an element matching both would be ambiguous.
pub struct HeadingPair {
    /// Heading level whose content becomes each card's `part`.
    pub parent: HeadingLevel,
    /// Heading level that opens a new card.
    pub node: HeadingLevel,
}

impl HeadingPair {
    /// Pairs two levels for segmentation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SameHeadingLevels`] if both levels are equal.
    pub fn new(parent: HeadingLevel, node: HeadingLevel) -> Result<Self> {
        if parent == node {
            return Err(Error::SameHeadingLevels(parent));
        }
        Ok(Self { parent, node })
    }
}

impl Default for HeadingPair {
    fn default() -> Self {
        Self {
            parent: HeadingLevel::H1,
            node: HeadingLevel::H2,
        }
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
