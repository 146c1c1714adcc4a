use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;

use crate::tui::app::App;
use crate::tui::detail::DetailButton;

/// Keys for the mounted overlay. Escape is handled by the bus listener.
pub(super) fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    let Some(view) = app.detail.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char('e') => view.activate(DetailButton::Edit),
        KeyCode::Char('d') => view.activate(DetailButton::Delete),
        KeyCode::Char('c') => view.activate(DetailButton::Close),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => view.focus_next(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => view.focus_prev(),
        KeyCode::Enter => {
            let focus = view.focus;
            view.activate(focus);
        }
        KeyCode::Char('j') | KeyCode::Down => view.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => view.scroll_up(),
        _ => {}
    }
}

/// Button clicks inside the panel; the × marker counts as Close
pub(super) fn handle_overlay_pointer(app: &mut App, pos: Position) {
    let Some(view) = app.detail.as_mut() else {
        return;
    };
    let button = view.layout.as_ref().and_then(|layout| layout.button_at(pos));
    if let Some(button) = button {
        view.activate(button);
    }
}
