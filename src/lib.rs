//! doccards: turn heading-structured documents into study cards.
//!
//! A `.docx` is converted to a flat markup fragment, split into top-level elements, and grouped
//! into cards by two heading levels: a parent level naming the broad topic and a node level
//! opening each card. Cards can then be browsed in order or reviewed one random card at a time.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod convert;
pub mod error;
pub mod formats;
pub mod input;
pub mod markup;
pub mod review;
pub mod section;
pub mod segment;
pub mod ui;

pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
pub(crate) mod fixtures;
