use super::draw;
use crate::app_state::AppState;
use crate::config::Config;
use crate::fixtures::{docx, heading, paragraph, study_notes};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(terminal: &mut Terminal<TestBackend>, app: &mut AppState) -> String {
    terminal.draw(|f| draw(f, app)).unwrap();
    screen(terminal)
}

/// Five cards with long bodies that wrap at narrow widths, then a short final card.
fn long_cards() -> Vec<u8> {
    let long_body = "word ".repeat(40);
    let mut body = String::new();
    for n in 1..=5 {
        body.push_str(&heading(2, &format!("Card {n}")));
        body.push_str(&paragraph(long_body.trim_end()));
    }
    body.push_str(&heading(2, "LASTCARD"));
    body.push_str(&paragraph("end"));
    docx(&body)
}

#[test]
fn test_browse_lists_every_card_in_order() {
    let mut app = AppState::new(Config::default(), Some(1)).unwrap();
    app.load_bytes(&study_notes()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();

    let text = render(&mut terminal, &mut app);

    let positions: Vec<usize> = ["Q1", "Body1", "Q2", "Body2", "Topic B", "Q3", "Body3"]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("{needle} not shown")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn test_scrolling_reaches_last_wrapped_card() {
    let mut app = AppState::new(Config::default(), Some(1)).unwrap();
    app.load_bytes(&long_cards()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();

    app.scroll_down(100_000);
    let text = render(&mut terminal, &mut app);

    assert!(text.contains("LASTCARD"), "last card not shown:\n{text}");
    assert!(text.contains("end"));

    // Scrolling past the end stays on the last page.
    let clamped = app.scroll;
    app.scroll_down(1);
    render(&mut terminal, &mut app);
    assert_eq!(app.scroll, clamped);
}

#[test]
fn test_every_wrapped_card_is_reachable() {
    let mut app = AppState::new(Config::default(), Some(1)).unwrap();
    app.load_bytes(&long_cards()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();

    let mut seen = Vec::new();
    loop {
        let text = render(&mut terminal, &mut app);
        for marker in ["#1", "#2", "#3", "#4", "#5", "#6"] {
            if text.contains(marker) && !seen.contains(&marker) {
                seen.push(marker);
            }
        }
        let before = app.scroll;
        app.scroll_down(1);
        render(&mut terminal, &mut app);
        if app.scroll == before {
            break;
        }
    }

    assert_eq!(seen, vec!["#1", "#2", "#3", "#4", "#5", "#6"]);
}

#[test]
fn test_unwrapped_scroll_stops_at_last_page() {
    let config = Config {
        wrap: false,
        ..Config::default()
    };
    let mut app = AppState::new(config, Some(1)).unwrap();
    app.load_bytes(&long_cards()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();

    app.scroll_down(100_000);
    let text = render(&mut terminal, &mut app);

    // 6 cards of 5 lines each, shown 7 rows at a time.
    assert_eq!(app.scroll, 23);
    assert!(text.contains("LASTCARD"));
}
