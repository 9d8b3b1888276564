//! The core state machine bridging loaded cards and the interactive views.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user moves
//! between screens. Everything belonging to the current session lives here: the heading
//! selectors, the loaded cards, the browse position and the review in progress. Finishing a
//! review throws the whole session away and starts over from the setup screen.

use crate::config::Config;
use crate::error::Result;
use crate::input::{self, Deck};
use crate::markup::MarkupReader;
use crate::review::{Draw, ReviewSession};
use crate::section::{HeadingLevel, HeadingPair, Section, SectionId};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
///
/// ```text
/// Setup -> Browse -> Quiz -> Setup (after the last card is discarded)
/// ```
pub enum View {
    /// No document loaded; choose a file and heading levels.
    Setup,
    /// Every card of the document, in order.
    Browse,
    /// One random card at a time.
    Quiz,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A card's markup flattened to terminal text lines.
pub struct CardText {
    /// Broad topic lines.
    pub part: Vec<String>,
    /// Card title lines.
    pub title: Vec<String>,
    /// Body lines.
    pub body: Vec<String>,
}

/// Owns all session state: configuration selectors, cards, and the review in progress.
pub struct AppState {
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Preferences the session was started with, restored on reset.
    pub config: Config,
    /// Selected parent heading level.
    pub parent: HeadingLevel,
    /// Selected node heading level.
    pub node: HeadingLevel,
    /// Path typed on the setup screen.
    pub path_input: String,
    /// Title of the loaded document, when it has one.
    pub document_title: Option<String>,
    /// Loaded cards in document order.
    pub sections: Vec<Section>,
    /// Terminal text for each card, indexed by [`SectionId`].
    pub card_text: Vec<CardText>,
    /// First visible line of the browse view.
    pub scroll: usize,
    /// Review in progress, when in the quiz view.
    pub review: Option<ReviewSession>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    defaults: HeadingPair,
    seed: Option<u64>,
}

impl AppState {
    /// Initialises a fresh session on the setup screen.
    ///
    /// `seed` makes card draws reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured heading levels are invalid.
    pub fn new(config: Config, seed: Option<u64>) -> Result<Self> {
        let defaults = config.headings()?;
        Ok(Self {
            current_view: View::Setup,
            config,
            parent: defaults.parent,
            node: defaults.node,
            path_input: String::new(),
            document_title: None,
            sections: Vec::new(),
            card_text: Vec::new(),
            scroll: 0,
            review: None,
            message: None,
            defaults,
            seed,
        })
    }

    /// Starts a session and loads a document given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Load failures are kept in the status
    /// message so the setup screen can show them.
    pub fn with_document(config: Config, seed: Option<u64>, path: &Path) -> Result<Self> {
        let mut app = Self::new(config, seed)?;
        app.path_input = path.to_string_lossy().into_owned();
        app.load_document();
        Ok(app)
    }

    /// Clears all session state and returns to the setup screen with the configured defaults.
    pub fn reset(&mut self) {
        self.current_view = View::Setup;
        self.parent = self.defaults.parent;
        self.node = self.defaults.node;
        self.path_input.clear();
        self.document_title = None;
        self.sections.clear();
        self.card_text.clear();
        self.scroll = 0;
        self.review = None;
        self.message = None;
    }

    /// Advances the parent selector to its next choice.
    pub fn cycle_parent(&mut self) {
        self.parent = self.parent.cycle(&HeadingLevel::PARENT_CHOICES);
    }

    /// Advances the node selector to its next choice.
    pub fn cycle_node(&mut self) {
        self.node = self.node.cycle(&HeadingLevel::NODE_CHOICES);
    }

    #[must_use]
    /// Whether the selectors name two different levels.
    pub fn headings_valid(&self) -> bool {
        self.parent != self.node
    }

    /// Loads the document named in the path input, reporting failure in the status message.
    ///
    /// On success the browse view opens; on failure the setup screen stays up.
    pub fn load_document(&mut self) {
        let path = PathBuf::from(self.path_input.trim());
        let result = input::read_document(&path, &self.config).and_then(|b| self.load_bytes(&b));
        match result {
            Ok(count) => info!("loaded {count} cards from {}", path.display()),
            Err(e) => {
                warn!("failed to load {}: {e}", path.display());
                self.message = Some(e.to_string());
            }
        }
    }

    /// Converts and segments document bytes with the selected heading levels.
    ///
    /// Returns the number of cards loaded and switches to the browse view.
    ///
    /// # Errors
    ///
    /// Returns an error if the selectors name the same level, conversion fails, or no cards are
    /// found.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let headings = HeadingPair::new(self.parent, self.node)?;
        let deck = input::extract_sections(bytes, headings)?;
        self.load_deck(deck)
    }

    fn load_deck(&mut self, deck: Deck) -> Result<usize> {
        let mut reader = MarkupReader::new()?;
        let mut card_text = Vec::with_capacity(deck.sections.len());
        for section in &deck.sections {
            let mut body = Vec::new();
            for fragment in &section.body {
                body.extend(reader.to_text_lines(fragment)?);
            }
            card_text.push(CardText {
                part: reader.to_text_lines(&section.part)?,
                title: reader.to_text_lines(&section.title)?,
                body,
            });
        }

        self.card_text = card_text;
        let count = deck.sections.len();
        self.sections = deck.sections;
        self.document_title = deck.title;
        self.scroll = 0;
        self.review = None;
        self.current_view = View::Browse;
        self.message = match deck.messages.len() {
            0 => Some(format!("{count} cards")),
            n => Some(format!("{count} cards ({n} conversion warnings)")),
        };
        Ok(count)
    }

    #[must_use]
    /// Terminal text for a card.
    pub fn text_for(&self, id: SectionId) -> Option<&CardText> {
        self.card_text.get(id.0)
    }

    /// Starts a random review over all loaded cards.
    pub fn start_quiz(&mut self) {
        let rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let headings = HeadingPair {
            parent: self.parent,
            node: self.node,
        };
        match ReviewSession::start(self.sections.clone(), headings, rng) {
            Ok(review) => {
                self.review = Some(review);
                self.current_view = View::Quiz;
                self.message = None;
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Shows the body of the active card.
    pub fn reveal(&mut self) {
        if let Some(review) = self.review.as_mut() {
            review.reveal();
        }
    }

    /// Removes the active card from the review and draws the next one.
    pub fn discard(&mut self) {
        let draw = self
            .review
            .as_mut()
            .map_or(Draw::Exhausted, ReviewSession::discard_and_draw);
        self.after_draw(draw);
    }

    /// Draws another card, keeping the active one in the review.
    pub fn skip(&mut self) {
        let draw = self
            .review
            .as_mut()
            .map_or(Draw::Exhausted, ReviewSession::skip_and_draw);
        self.after_draw(draw);
    }

    fn after_draw(&mut self, draw: Draw) {
        if draw == Draw::Exhausted {
            info!("review finished, resetting session");
            self.reset();
            self.message = Some("All cards discarded. Load a document to start again.".into());
        }
    }

    /// Scrolls the browse view up by `lines`.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scrolls the browse view down by `lines`; the view clamps to its content when drawn.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    /// Returns the browse view to the first card.
    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
