use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::detail::DELETE_PROMPT;
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Render the delete confirmation popup over the detail overlay
pub fn render_confirm_popup(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let view = match app.detail.as_mut() {
        Some(view) if view.is_confirm_pending() => view,
        Some(view) => {
            view.set_confirm_area(None);
            return;
        }
        None => return,
    };

    let bg = theme.background;
    let header_style = Style::default()
        .fg(theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text).bg(bg);
    let bright_style = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" 메모 삭제", header_style)));
    lines.push(Line::from(Span::styled("", text_style)));
    for row in wrap_text(" ", DELETE_PROMPT, inner_w) {
        lines.push(Line::from(Span::styled(row, text_style)));
    }
    lines.push(Line::from(Span::styled("", text_style)));
    let title = format!("\u{201C}{}\u{201D}", view.memo().title);
    lines.push(Line::from(Span::styled(
        format!(" {}", unicode::truncate_to_width(&title, inner_w.saturating_sub(1))),
        bright_style,
    )));
    lines.push(Line::from(Span::styled("", text_style)));
    lines.push(Line::from(vec![
        Span::styled(" ", text_style),
        Span::styled("y", dim_style),
        Span::styled(" 삭제  ", text_style),
        Span::styled("n", dim_style),
        Span::styled(" 취소", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.red).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        popup,
    );
    view.set_confirm_area(Some(popup));
}
