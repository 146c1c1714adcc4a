use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;

use crate::tui::app::App;
use crate::tui::detail::ConfirmResponse;

pub(super) fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    let response = match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) => ConfirmResponse::Yes,
        (KeyModifiers::NONE, KeyCode::Char('n')) => ConfirmResponse::No,
        (_, KeyCode::Esc) => ConfirmResponse::Dismissed,
        _ => return,
    };
    if let Some(view) = app.detail.as_mut() {
        view.resolve_delete(response);
    }
}

/// A press outside the popup dismisses it; inside does nothing
pub(super) fn handle_confirm_pointer(app: &mut App, pos: Position) {
    let Some(view) = app.detail.as_mut() else {
        return;
    };
    let inside = view
        .layout
        .as_ref()
        .and_then(|layout| layout.confirm)
        .is_some_and(|popup| popup.contains(pos));
    if !inside {
        view.resolve_delete(ConfirmResponse::Dismissed);
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_event;
    use super::super::tests::{click, draw, key};
    use crate::tui::detail::DeleteState;
    use crate::tui::test_helpers::*;
    use crossterm::event::KeyCode;

    fn pending() -> crate::tui::app::App {
        let mut app = sample_app();
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Char('d')));
        app
    }

    #[test]
    fn y_deletes_and_closes() {
        let mut app = pending();
        handle_event(&mut app, key(KeyCode::Char('y')));
        assert!(app.detail.is_none());
        assert!(app.store.get("w1").is_none());
        assert_eq!(app.bus.listener_count(), 0);
    }

    #[test]
    fn n_cancels_and_stays_open() {
        let mut app = pending();
        handle_event(&mut app, key(KeyCode::Char('n')));
        let view = app.detail.as_ref().unwrap();
        assert_eq!(view.delete_state(), DeleteState::Cancelled);
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn escape_dismisses_prompt_not_overlay() {
        let mut app = pending();
        handle_event(&mut app, key(KeyCode::Esc));
        let view = app.detail.as_ref().expect("overlay stays mounted");
        assert_eq!(view.delete_state(), DeleteState::Cancelled);
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn other_keys_wait_for_answer() {
        let mut app = pending();
        handle_event(&mut app, key(KeyCode::Char('e')));
        assert!(app.detail.as_ref().unwrap().is_confirm_pending());
        assert!(app.pending_commands().is_empty());
    }

    #[test]
    fn click_outside_popup_dismisses() {
        let mut app = pending();
        draw(&mut app);
        handle_event(&mut app, click(0, 0));
        let view = app.detail.as_ref().expect("overlay stays mounted");
        assert_eq!(view.delete_state(), DeleteState::Cancelled);
    }

    #[test]
    fn click_inside_popup_keeps_prompt() {
        let mut app = pending();
        draw(&mut app);
        let popup = app.detail.as_ref().unwrap().layout.as_ref().unwrap().confirm.unwrap();
        handle_event(&mut app, click(popup.x + 1, popup.y + 1));
        assert!(app.detail.as_ref().unwrap().is_confirm_pending());
    }

    #[test]
    fn request_again_after_cancel() {
        let mut app = pending();
        handle_event(&mut app, key(KeyCode::Char('n')));
        handle_event(&mut app, key(KeyCode::Char('d')));
        handle_event(&mut app, key(KeyCode::Char('y')));
        assert!(app.store.get("w1").is_none());
    }
}
