//! The UI renders the application state into something visible.
//!
//! The draw function dispatches based on the current view: the setup screen, the full card list,
//! or the single-card quiz.

use crate::app_state::{AppState, CardText, View};
use crate::section::HeadingLevel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const INTRO: &str = "Convert a .docx document into study cards. The parent heading names the \
broad topic and the node heading opens each card: for a document using h1 for topics and h2 for \
details, choose h1 as parent and h2 as node.";

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::Setup => draw_setup(f, app),
        View::Browse => draw_browse(f, app),
        View::Quiz => draw_quiz(f, app),
    }
}

fn part_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

fn title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn card_lines(text: &CardText, show_body: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    lines.extend(
        text.part
            .iter()
            .map(|l| Line::styled(l.clone(), part_style())),
    );
    lines.extend(
        text.title
            .iter()
            .map(|l| Line::styled(l.clone(), title_style())),
    );
    if show_body {
        lines.push(Line::default());
        lines.extend(text.body.iter().map(|l| Line::raw(l.clone())));
    }
    lines
}

fn selector_spans(
    label: &str,
    selected: HeadingLevel,
    choices: &[HeadingLevel],
) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(format!("{label}: "), title_style())];
    for choice in choices {
        let style = if *choice == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", choice.tag().to_uppercase()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect, help: &str) {
    let text = app.message.as_deref().map_or_else(
        || Line::raw(help.to_string()),
        |msg| Line::styled(msg.to_string(), Style::default().fg(Color::Yellow)),
    );
    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_setup(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(3),    // Instructions
            Constraint::Length(3), // Path input
            Constraint::Length(3), // Selectors
            Constraint::Length(3), // Status
        ])
        .split(f.area());

    let heading = Paragraph::new(Line::styled(".docx to Study Cards", title_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(heading, chunks[0]);

    let intro = Paragraph::new(INTRO)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("How it works"));
    f.render_widget(intro, chunks[1]);

    let extensions = app.config.file_extensions.join(", ");
    let path = Paragraph::new(format!("{}▏", app.path_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Document ({extensions})")),
    );
    f.render_widget(path, chunks[2]);

    let mut spans = selector_spans("Parent", app.parent, &HeadingLevel::PARENT_CHOICES);
    spans.push(Span::raw("   "));
    spans.extend(selector_spans("Node", app.node, &HeadingLevel::NODE_CHOICES));
    if !app.headings_valid() {
        spans.push(Span::styled(
            "  parent and node must differ",
            Style::default().fg(Color::Red),
        ));
    }
    let selectors = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Headings"));
    f.render_widget(selectors, chunks[3]);

    draw_status(
        f,
        app,
        chunks[4],
        "Type a path | Enter: Load | Shift+Tab: Parent | Tab: Node | Esc: Quit",
    );
}

fn draw_browse(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let mut lines: Vec<Line> = Vec::new();
    for section in &app.sections {
        let Some(text) = app.text_for(section.id) else {
            continue;
        };
        lines.push(Line::styled(
            format!("#{}", section.id.0 + 1),
            Style::default().fg(Color::DarkGray),
        ));
        lines.extend(card_lines(text, true));
        lines.push(Line::default());
    }

    let title = match &app.document_title {
        Some(doc) => format!("{doc} ({} cards)", app.sections.len()),
        None => format!("Cards ({})", app.sections.len()),
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(chunks[0]);
    let mut cards = Paragraph::new(lines).block(block);
    if app.config.wrap {
        cards = cards.wrap(Wrap { trim: false });
    }

    // Scroll counts rendered rows, so clamp against the wrapped height less one page.
    let rows = cards
        .line_count(inner.width)
        .saturating_sub(usize::from(chunks[0].height.saturating_sub(inner.height)));
    app.scroll = app.scroll.min(rows.saturating_sub(usize::from(inner.height)));
    let cards = cards.scroll((u16::try_from(app.scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(cards, chunks[0]);

    draw_status(
        f,
        app,
        chunks[1],
        "↑/↓/PgUp/PgDn: Scroll | Home: Top | t: Test yourself | q: Quit",
    );
}

fn draw_quiz(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Counter
            Constraint::Min(0),    // Card
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let Some(review) = app.review.as_ref() else {
        return;
    };

    let counter = Paragraph::new(Line::styled(review.counter().to_string(), title_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Remaining"));
    f.render_widget(counter, chunks[0]);

    if let Some(text) = review.active().and_then(|s| app.text_for(s.id)) {
        let revealed = review.is_revealed();
        let mut lines = card_lines(text, revealed);
        if !revealed {
            lines.push(Line::default());
            lines.push(Line::styled(
                "[Space] reveal",
                Style::default().fg(Color::DarkGray),
            ));
        }
        let mut card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        if app.config.wrap {
            card = card.wrap(Wrap { trim: false });
        }
        f.render_widget(card, chunks[1]);
    }

    draw_status(
        f,
        app,
        chunks[2],
        "Space: Reveal | d: Discard & next | s: Skip | q: Quit",
    );
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
