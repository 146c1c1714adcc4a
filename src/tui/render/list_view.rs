use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::display_timestamp_in;
use crate::tui::app::App;
use crate::util::unicode;

/// Rows above the memo rows (header + separator)
pub const LIST_HEADER_ROWS: u16 = 2;
const LABEL_COL: usize = 10;
const TIME_COL: usize = 27;

/// Render the memo list, most recently updated first
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let header = Line::from(vec![
        Span::styled(
            " memo",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" \u{00B7} {}개", app.order.len()),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let rows_area = Rect {
        y: area.y + LIST_HEADER_ROWS.min(area.height),
        height: area.height.saturating_sub(LIST_HEADER_ROWS),
        ..area
    };
    app.list_area = Some(rows_area);

    if app.order.is_empty() {
        let lines = vec![
            header,
            separator,
            Line::from(Span::styled(
                " 메모가 없습니다",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor row visible
    let visible = rows_area.height as usize;
    if app.cursor < app.list_scroll {
        app.list_scroll = app.cursor;
    } else if visible > 0 && app.cursor >= app.list_scroll + visible {
        app.list_scroll = app.cursor + 1 - visible;
    }

    let title_w = width.saturating_sub(2 + LABEL_COL + TIME_COL + 2);
    let mut lines = vec![header, separator];

    for (idx, memo) in app
        .memos_in_order()
        .into_iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(visible)
    {
        let is_cursor = idx == app.cursor;
        let row_bg = if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let mut spans: Vec<Span> = Vec::new();

        if is_cursor {
            spans.push(Span::styled(
                "\u{258E} ",
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ));
        } else {
            spans.push(Span::styled("  ", Style::default().bg(row_bg)));
        }

        let title_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        let title = unicode::truncate_to_width(&memo.title, title_w);
        spans.push(Span::styled(unicode::pad_to_width(&title, title_w + 1), title_style));

        let label = app.labels.label(&memo.category);
        spans.push(Span::styled(
            unicode::pad_to_width(&unicode::truncate_to_width(label, LABEL_COL - 1), LABEL_COL),
            Style::default()
                .fg(app.theme.category_color(&memo.category))
                .bg(row_bg),
        ));

        let updated = display_timestamp_in(&memo.updated_at, &Local);
        spans.push(Span::styled(
            unicode::truncate_to_width(&updated, TIME_COL),
            Style::default().fg(app.theme.dim).bg(row_bg),
        ));

        // Fill the rest of the row so the selection bar spans the width
        let used: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(row_bg)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Map a screen row inside the list to a memo index
pub fn row_at(app: &App, y: u16) -> Option<usize> {
    let area = app.list_area?;
    if y < area.y || y >= area.bottom() {
        return None;
    }
    let idx = app.list_scroll + (y - area.y) as usize;
    (idx < app.order.len()).then_some(idx)
}
