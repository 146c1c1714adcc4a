use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

const LIST_HINTS: &str = "j/k move  Enter open  q quit";
const DETAIL_HINTS: &str = "e edit  d delete  c/Esc close  Tab focus";
const CONFIRM_HINTS: &str = "y delete  n/Esc cancel";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = match &app.detail {
        Some(view) if view.is_confirm_pending() => CONFIRM_HINTS,
        Some(_) => DETAIL_HINTS,
        None => LIST_HINTS,
    };

    let mut spans: Vec<Span> = Vec::new();
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    } else if app.show_key_hints {
        spans.push(Span::styled(
            format!(" {}", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let position = if app.order.is_empty() {
        String::new()
    } else {
        format!("{}/{} ", app.cursor + 1, app.order.len())
    };

    let content_width: usize = spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum();
    let position_width = unicode::display_width(&position);
    if content_width + position_width < width {
        let padding = width - content_width - position_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            position,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
