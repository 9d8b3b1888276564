//! Random-draw review over a shrinking working collection of cards.
//!
//! The session owns its cards outright. Drawing never consumes a card; only a discard removes
//! one, and removal is by [`SectionId`] so two cards with identical content stay distinct.
//!
//! ```text
//! start -> draw -> (reveal)* -> discard | skip -> draw -> ... -> Exhausted
//! ```

use crate::error::{Error, Result};
use crate::section::{HeadingPair, Section, SectionId};
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of drawing a card.
pub enum Draw {
    /// A card is now active.
    Card(SectionId),
    /// No cards remain; the session is over.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Cards still in play against the number the session started with.
pub struct Counter {
    /// Size of the working collection.
    pub remaining: usize,
    /// Size of the collection when the session started.
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remaining, self.total)
    }
}

/// Random single-card review state.
pub struct ReviewSession<R = StdRng> {
    working: Vec<Section>,
    total: usize,
    active: Option<SectionId>,
    revealed: bool,
    rng: R,
}

impl<R: Rng> ReviewSession<R> {
    /// Starts a review over `sections` and draws the first card.
    ///
    /// `headings` is only used to describe an empty collection in the error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSections`] if `sections` is empty.
    pub fn start(sections: Vec<Section>, headings: HeadingPair, rng: R) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::NoSections {
                parent: headings.parent,
                node: headings.node,
            });
        }
        let mut session = Self {
            total: sections.len(),
            working: sections,
            active: None,
            revealed: false,
            rng,
        };
        session.draw_random();
        Ok(session)
    }

    /// Picks a card uniformly at random from the working collection and hides its body.
    ///
    /// The previously active card stays eligible, so the same card can come up twice in a row.
    pub fn draw_random(&mut self) -> Draw {
        if self.working.is_empty() {
            self.active = None;
            return Draw::Exhausted;
        }
        let index = self.rng.random_range(0..self.working.len());
        let id = self.working[index].id;
        self.active = Some(id);
        self.revealed = false;
        Draw::Card(id)
    }

    /// Shows the active card's body.
    pub fn reveal(&mut self) {
        if self.active.is_some() {
            self.revealed = true;
        }
    }

    /// Removes the active card from play and draws another.
    ///
    /// Discarding the last card, or discarding with no active card, exhausts the session.
    pub fn discard_and_draw(&mut self) -> Draw {
        let Some(active) = self.active else {
            return self.exhaust();
        };
        if self.working.len() <= 1 {
            return self.exhaust();
        }
        self.working.retain(|s| s.id != active);
        self.draw_random()
    }

    /// Draws another card, leaving the active one in play.
    pub fn skip_and_draw(&mut self) -> Draw {
        self.draw_random()
    }

    fn exhaust(&mut self) -> Draw {
        self.working.clear();
        self.active = None;
        self.revealed = false;
        Draw::Exhausted
    }
}

impl<R> ReviewSession<R> {
    #[must_use]
    /// The card currently shown, if any.
    pub fn active(&self) -> Option<&Section> {
        let id = self.active?;
        self.working.iter().find(|s| s.id == id)
    }

    #[must_use]
    /// Whether the active card's body is shown.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    /// Number of cards still eligible for drawing.
    pub fn remaining(&self) -> usize {
        self.working.len()
    }

    #[must_use]
    /// Remaining cards against the starting total.
    pub fn counter(&self) -> Counter {
        Counter {
            remaining: self.working.len(),
            total: self.total,
        }
    }
}

#[cfg(test)]
#[path = "tests/review.rs"]
mod tests;
