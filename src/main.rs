//! doccards: study cards from heading-structured documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use doccards::app_state::{AppState, View};
use doccards::{config, input, ui};
use log::{error, LevelFilter};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const PAGE: usize = 10;

#[derive(Parser)]
#[command(name = "doccards")]
#[command(about = "Turn heading-structured .docx documents into study cards", long_about = None)]
struct Args {
    /// Document to open
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Heading level naming the broad topic (h1, h2 or h3)
    #[arg(long, value_name = "LEVEL")]
    parent: Option<String>,

    /// Heading level opening each card (h2, h3 or h4)
    #[arg(long, value_name = "LEVEL")]
    node: Option<String>,

    /// File extensions to accept
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Seed for reproducible card draws
    #[arg(long)]
    seed: Option<u64>,

    /// Print the cards as JSON instead of starting the interface
    #[arg(long)]
    json: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Builds the logger for this run, or `None` when nothing may be written.
///
/// The interface owns the terminal, so without a log file it gets no logger at all and
/// `RUST_LOG` cannot send output underneath it.
fn logger(log_file: Option<&Path>, to_stderr: bool) -> io::Result<Option<env_logger::Builder>> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            builder
                .filter_level(LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        None if to_stderr => {
            builder.filter_level(LevelFilter::Warn);
        }
        None => return Ok(None),
    }
    builder.parse_default_env();
    Ok(Some(builder))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match logger(args.log_file.as_deref(), args.json) {
        Ok(Some(mut builder)) => builder.init(),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Could not open log file: {e}");
            return ExitCode::FAILURE;
        }
    }

    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(parent) = args.parent {
        cfg.parent_header = parent;
    }
    if let Some(node) = args.node {
        cfg.section_header = node;
    }
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }

    let result = if args.json {
        match args.path {
            Some(path) => print_json(&path, &cfg),
            None => {
                eprintln!("--json needs a document path");
                return ExitCode::FAILURE;
            }
        }
    } else {
        run(cfg, args.seed, args.path)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_json(path: &Path, cfg: &config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let headings = cfg.headings()?;
    let bytes = input::read_document(path, cfg)?;
    let deck = input::extract_sections(&bytes, headings)?;
    for message in &deck.messages {
        log::warn!("{message}");
    }
    let json = serde_json::to_string_pretty(&deck.sections)?;
    println!("{json}");
    Ok(())
}

fn run(
    cfg: config::Config,
    seed: Option<u64>,
    path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = match path {
        Some(path) => AppState::with_document(cfg, seed, &path)?,
        None => AppState::new(cfg, seed)?,
    };
    run_tui(app)?;
    Ok(())
}

fn run_tui(mut app: AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        app.message = None;
        match app.current_view {
            View::Setup => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.load_document(),
                KeyCode::Tab => app.cycle_node(),
                KeyCode::BackTab => app.cycle_parent(),
                KeyCode::Backspace => {
                    app.path_input.pop();
                }
                KeyCode::Char(c) => app.path_input.push(c),
                _ => {}
            },
            View::Browse => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('t') => app.start_quiz(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                KeyCode::PageUp => app.scroll_up(PAGE),
                KeyCode::PageDown => app.scroll_down(PAGE),
                KeyCode::Home => app.scroll_top(),
                _ => {}
            },
            View::Quiz => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(' ' | 'r') | KeyCode::Enter => app.reveal(),
                KeyCode::Char('d') => app.discard(),
                KeyCode::Char('s' | 'n') | KeyCode::Right => app.skip(),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/main.rs"]
mod tests;
