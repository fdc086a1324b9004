//! Interactive TUI: review, select and clean.

pub mod app;
pub mod event;
pub mod ui;
pub mod viewport;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self as term_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::cleaner::CleanerRegistry;
use crate::disk::available_space;
use crate::engine::Engine;

pub use app::{App, Phase};
use event::{handle_key_event, Command};

/// Settings for one interactive run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub is_root: bool,
    pub preselect: bool,
    pub tick_rate: Duration,
    /// Path whose filesystem free space is shown in the header.
    pub free_space_path: Option<PathBuf>,
}

/// What happened, for printing after the terminal is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: bool,
    pub cleaned: usize,
    pub failed: Vec<(String, String)>,
    pub freed: Option<u64>,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the TUI until the user quits or cleaning finishes.
pub fn run(registry: &CleanerRegistry, options: RunOptions) -> Result<RunSummary> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("entering alternate screen");
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .context("initialising terminal")
        .and_then(|mut terminal| {
            let res = event_loop(&mut terminal, registry, &options);
            let _ = terminal.show_cursor();
            res
        });

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);

    result
}

fn event_loop(terminal: &mut Term, registry: &CleanerRegistry, options: &RunOptions) -> Result<RunSummary> {
    let mut app = App::new(registry.cleaners(), options.is_root, options.preselect);
    let size = terminal.size().context("reading terminal size")?;
    app.resize(size.width, size.height);
    app.free_before = measure_free_space(options);

    let engine = Engine::new();
    engine.dispatch_scans(app.scan_units());

    loop {
        terminal
            .draw(|frame| ui::render(&app, frame))
            .context("drawing frame")?;

        if app.should_quit || app.phase == Phase::Done {
            break;
        }

        while let Some(event) = engine.try_next() {
            let was_cleaning = app.phase == Phase::Cleaning;
            app.apply_event(event);
            if was_cleaning && app.phase == Phase::Done {
                app.free_after = measure_free_space(options);
            }
        }

        if term_event::poll(options.tick_rate).context("polling input")? {
            match term_event::read().context("reading input")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Command::Clean(units) = handle_key_event(&mut app, key) {
                        engine.dispatch_cleans(units);
                    }
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        app.tick = app.tick.wrapping_add(1);
    }

    if app.should_quit {
        tracing::info!(phase = ?app.phase, "Quit requested");
    }

    Ok(summarize(&app))
}

fn measure_free_space(options: &RunOptions) -> Option<u64> {
    let path = options.free_space_path.as_deref()?;
    match available_space(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Free space unavailable");
            None
        }
    }
}

/// Outcome of a run as plain data.
pub fn summarize(app: &App) -> RunSummary {
    RunSummary {
        completed: app.phase == Phase::Done,
        cleaned: app.cleaned_ok(),
        failed: app
            .items
            .iter()
            .filter(|i| i.cleaned)
            .filter_map(|i| {
                i.error
                    .as_ref()
                    .map(|e| (i.cleaner.name().to_string(), e.to_string()))
            })
            .collect(),
        freed: app.freed(),
    }
}
