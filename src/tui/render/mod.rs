pub mod confirm_popup;
pub mod detail_modal;
pub mod helpers;
pub mod list_view;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    list_view::render_list_view(frame, app, content);

    // Detail overlay sits on top of the list, the confirm popup on top of both
    if app.detail.is_some() {
        detail_modal::render_detail_modal(frame, app, content);
        confirm_popup::render_confirm_popup(frame, app, content);
    }

    status_row::render_status_row(frame, app, status);
}
