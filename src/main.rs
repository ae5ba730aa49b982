mod app;
mod categories;
mod event;
mod store;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as ct_event, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;
use crate::categories::EventKey;
use crate::event::AppEvent;
use crate::store::{BreakpointStore, EventListenerStore};

#[derive(Parser)]
#[command(name = "event-breakpoints", about = "Event-listener breakpoint panel")]
struct Cli {
    /// Breakpoint to arm on startup, as `Category:eventType` (repeatable)
    #[arg(long = "active", value_name = "KEY")]
    active: Vec<String>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let mut store = BreakpointStore::new(validate_keys(&cli.active)?);

    // ── Terminal setup ──────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Panic hook: restore terminal before printing the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // ── Run ─────────────────────────────────────────────────────
    let result = run(&mut terminal, &mut store);

    // ── Terminal teardown ───────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;

    for key in store.active_event_listeners() {
        println!("{key}");
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Reject startup keys the taxonomy cannot produce.
fn validate_keys(raw: &[String]) -> Result<Vec<EventKey>> {
    for key in raw {
        if !categories::is_known_key(key) {
            bail!("unknown event listener breakpoint: {key}");
        }
    }
    Ok(raw.to_vec())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut BreakpointStore,
) -> Result<()> {
    let mut app = App::new();
    let (tx, rx) = mpsc::channel::<AppEvent>();

    // ── Keyboard + resize thread ────────────────────────────────
    thread::spawn(move || loop {
        match ct_event::poll(Duration::from_millis(100)) {
            Ok(true) => match ct_event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            },
            Ok(false) => {} // timeout, poll again
            Err(_) => break,
        }
    });

    info!(
        "panel started with {} armed",
        store.active_event_listeners().len()
    );

    // ── Main event loop ─────────────────────────────────────────
    terminal.draw(|frame| ui::draw(frame, &app, store.active_event_listeners()))?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Key(key) => handle_key(&mut app, key, store),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            break;
        }

        terminal.draw(|frame| ui::draw(frame, &app, store.active_event_listeners()))?;
    }

    Ok(())
}

/// Dispatch a single key event to the panel.
fn handle_key(app: &mut App, key: KeyEvent, store: &mut BreakpointStore) {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => app.should_quit = true,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.should_quit = true,
        // Navigate
        (KeyCode::Char('j') | KeyCode::Down, _) => app.select_next(),
        (KeyCode::Char('k') | KeyCode::Up, _) => app.select_prev(),
        (KeyCode::Char('g') | KeyCode::Home, _) => app.select_first(),
        (KeyCode::Char('G') | KeyCode::End, _) => app.select_last(),
        // Checkbox
        (KeyCode::Char(' '), _) => app.click_selected(store),
        // Arrow
        (KeyCode::Enter | KeyCode::Tab, _) => app.activate_selected(store),
        (KeyCode::Char('l') | KeyCode::Right, _) => app.expand_selected(),
        (KeyCode::Char('h') | KeyCode::Left, _) => app.collapse_selected(),
        _ => {}
    }
}
