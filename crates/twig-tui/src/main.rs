//! twig — a collapsible filesystem tree in the terminal.
//!
//! This binary initialises the terminal, runs the main event loop,
//! and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{load_default_config, App};
use crate::input::{handle_key, InputState};
use crate::render::render;

/// Environment variable naming the log file.
const LOG_ENV: &str = "TWIG_LOG";
const DEFAULT_LOG_PATH: &str = "/tmp/twig.log";

/// How long the loop waits for input before ticking.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file so output never lands on the alternate screen.
fn init_tracing() -> anyhow::Result<()> {
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = init_tracing() {
        eprintln!("Logging disabled: {e}");
    }

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &root);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    root: &Path,
) -> anyhow::Result<()> {
    let config = load_default_config();
    tracing::info!("starting twig at {}", root.display());

    let mut app = App::new(root, config);
    let mut input_state = InputState::new();

    loop {
        terminal.draw(|f| render(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let (action, new_state) = handle_key(key, &input_state);
                    input_state = new_state;
                    app.handle_action(action);
                }
            }
        }

        if let Some(path) = app.take_pending_open() {
            match launch_editor(terminal, &path) {
                Ok(()) => app.refresh(),
                Err(e) => {
                    tracing::warn!("editor failed for {}: {e}", path.display());
                    app.set_status(format!("Editor failed: {e}"));
                }
            }
        }

        if app.should_quit() {
            break;
        }

        app.tick();
    }

    app.teardown();
    Ok(())
}

/// Suspends the TUI, runs `$EDITOR` (or `vi`) on `file_path`, and restores
/// the TUI afterwards.
fn launch_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    file_path: &Path,
) -> anyhow::Result<()> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    // Leave alternate screen and restore normal terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let status = std::process::Command::new(&editor).arg(file_path).status();

    // Re-enter alternate screen regardless of editor result
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => anyhow::bail!("{editor} exited with {s}"),
        Err(e) => anyhow::bail!("failed to launch {editor}: {e}"),
    }
}
