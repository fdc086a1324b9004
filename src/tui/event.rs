//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Phase};
use crate::engine::Unit;

/// Work the event loop must start after a key press.
#[derive(Debug)]
pub enum Command {
    None,
    /// The user confirmed; dispatch these clean units.
    Clean(Vec<Unit>),
}

/// Handle a single key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::None;
    }

    // Global quit, whatever is in flight.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Command::None;
    }

    match app.phase {
        Phase::Review => handle_review(app, key),
        Phase::LargeFileSelection => handle_large_files(app, key),
        Phase::Confirm => return handle_confirm(app, key),
        Phase::Scanning | Phase::Cleaning | Phase::Done => {
            if key.code == KeyCode::Char('q') {
                app.should_quit = true;
            }
        }
    }

    Command::None
}

fn handle_review(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }

        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),

        KeyCode::Char(' ') | KeyCode::Enter => activate(app),

        KeyCode::Char('c') => {
            app.request_confirm();
        }

        _ => {}
    }
}

/// Space/Enter in the review list: button, drill-down, or toggle.
fn activate(app: &mut App) {
    if app.on_clean_button() {
        app.request_confirm();
        return;
    }

    let cursor = app.cursor;
    if app.is_drill_down(cursor) && !app.items[cursor].skip {
        app.enter_large_files();
        return;
    }

    app.toggle(cursor);
}

fn handle_large_files(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q')
        | KeyCode::Esc
        | KeyCode::Backspace
        | KeyCode::Left
        | KeyCode::Char('h') => {
            app.phase = Phase::Review;
        }

        KeyCode::Up | KeyCode::Char('k') => app.move_lf_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_lf_cursor(1),

        KeyCode::Char(' ') | KeyCode::Enter => {
            if !app.large_files.is_empty() {
                app.toggle_large_file(app.lf_cursor);
            }
        }

        _ => {}
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            Command::Clean(app.begin_cleaning())
        }
        KeyCode::Char('n')
        | KeyCode::Char('N')
        | KeyCode::Char('q')
        | KeyCode::Esc
        | KeyCode::Backspace => {
            app.phase = Phase::Review;
            Command::None
        }
        _ => Command::None,
    }
}
