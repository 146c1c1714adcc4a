use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;

use crate::tui::app::App;
use crate::tui::render::list_view::row_at;

pub(super) fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    app.status_message = None;
}

/// Clicking a row selects it and opens the overlay
pub(super) fn handle_list_pointer(app: &mut App, pos: Position) {
    if let Some(idx) = row_at(app, pos.y) {
        app.cursor = idx;
        app.open_selected();
    }
}
