//! Keyboard input dispatch — detail overlay first, then the grid.
//!
//! The search box is always live: printable characters edit the query and
//! re-filter as you type, so the chorded keys carry the actions
//! (Ctrl-F favorite, Tab watchlist-only, Ctrl-C quit).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Quit is available everywhere.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // The detail overlay consumes input while open.
    if app.selection.is_open() {
        handle_detail_key(app, key);
        return;
    }

    handle_grid_key(app, key);
}

/// Any close affordance returns to the grid unconditionally — even while
/// the detail fetch is still in flight.
fn handle_detail_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.close_detail();
        }
        _ => {}
    }
}

fn handle_grid_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Down => app.move_cursor(1),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Enter => app.select_under_cursor(),
        KeyCode::Tab => app.toggle_watchlist_only(),
        KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_favorite_under_cursor();
        }
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Esc => {
            if app.query.text.is_empty() {
                app.running = false;
            } else {
                app.query.text.clear();
                app.clamp_cursor();
            }
        }
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_query_char(c);
        }
        _ => {}
    }
}
