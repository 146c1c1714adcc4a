mod confirm;
mod list;
mod overlay;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::app::App;
use super::listeners::InputEvent;

use confirm::{handle_confirm_key, handle_confirm_pointer};
use list::{handle_list_key, handle_list_pointer};
use overlay::{handle_overlay_key, handle_overlay_pointer};

/// Handle one terminal event, then apply whatever the overlay requested
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
    app.drain_commands();
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // A pending delete prompt intercepts all input
    if app.detail.as_ref().is_some_and(|v| v.is_confirm_pending()) {
        handle_confirm_key(app, key);
        return;
    }

    if app.detail.is_some() {
        app.bus.dispatch(&InputEvent::Key(key));
        // Escape already asked the overlay to close
        if app.close_requested() {
            return;
        }
        handle_overlay_key(app, key);
        return;
    }

    handle_list_key(app, key);
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let button = match mouse.kind {
        MouseEventKind::Down(button) => button,
        MouseEventKind::ScrollDown => {
            if let Some(view) = app.detail.as_mut() {
                view.scroll_down();
            }
            return;
        }
        MouseEventKind::ScrollUp => {
            if let Some(view) = app.detail.as_mut() {
                view.scroll_up();
            }
            return;
        }
        _ => return,
    };
    let pos = Position::new(mouse.column, mouse.row);

    if app.detail.as_ref().is_some_and(|v| v.is_confirm_pending()) {
        handle_confirm_pointer(app, pos);
        return;
    }

    if app.detail.is_some() {
        app.bus.dispatch(&InputEvent::PointerDown(pos));
        // Any button counts as a press for the overlay; only left clicks press buttons
        if app.close_requested() || button != MouseButton::Left {
            return;
        }
        handle_overlay_pointer(app, pos);
        return;
    }

    if button == MouseButton::Left {
        handle_list_pointer(app, pos);
    }
}
