use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::app::App;
use crate::tui::detail::{DetailButton, DetailContent, DetailLayout};
use crate::tui::markdown::markdown_to_lines;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, spans_width, wrapped_rows};

const MAX_PANEL_W: u16 = 76;
/// Title, blank, badge, two timestamps, separator
const HEADER_H: u16 = 6;
/// Separator and button row
const FOOTER_H: u16 = 2;

/// Render the memo detail overlay on top of whatever is already drawn
pub fn render_detail_modal(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let Some(view) = app.detail.as_mut() else {
        return;
    };
    let content = view.content(&app.labels, &Local);

    dim_backdrop(frame, theme, area);

    let panel_w = MAX_PANEL_W.min(area.width.saturating_sub(4)).max(area.width.min(20));
    // borders + horizontal padding
    let inner_w = panel_w.saturating_sub(4) as usize;

    let body = markdown_to_lines(&content.body, theme);
    let body_rows: usize = body
        .iter()
        .map(|l| wrapped_rows(l.width(), inner_w))
        .sum();
    let tag_lines = tag_lines(&content, theme, inner_w);
    let tags_rows = if tag_lines.is_empty() { 0 } else { tag_lines.len().saturating_add(1) };
    let tags_h = to_u16(tags_rows);

    let wanted_h = (2 + HEADER_H + FOOTER_H) as usize + body_rows.max(1) + tags_rows;
    let panel_h = to_u16(wanted_h.min(area.height.saturating_sub(2) as usize));
    let panel = centered_rect_fixed(panel_w, panel_h, area);

    let bg = theme.panel_bg;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title_top(
            Line::styled(" \u{00D7} ", Style::default().fg(theme.dim).bg(bg)).right_aligned(),
        )
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(bg));
    let inner = block.inner(panel);

    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let [header_area, body_area, tags_area, footer_area] = Layout::vertical([
        Constraint::Length(HEADER_H),
        Constraint::Min(1),
        Constraint::Length(tags_h),
        Constraint::Length(FOOTER_H),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(header_lines(&content, theme, inner_w)).style(Style::default().bg(bg)),
        header_area,
    );

    // Keep scroll within the body
    let max_scroll = to_u16(body_rows.saturating_sub(body_area.height as usize));
    view.scroll = view.scroll.min(max_scroll);
    frame.render_widget(
        Paragraph::new(body)
            .style(Style::default().fg(theme.text).bg(bg))
            .wrap(Wrap { trim: false })
            .scroll((view.scroll, 0)),
        body_area,
    );

    if !tag_lines.is_empty() {
        let mut lines = vec![Line::raw("")];
        lines.extend(tag_lines);
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), tags_area);
    }

    let buttons = render_footer(frame, theme, view.focus, footer_area);

    let close_marker = Rect::new(
        panel.x + panel.width.saturating_sub(4),
        panel.y,
        3.min(panel.width),
        1,
    );
    view.set_layout(DetailLayout {
        panel,
        close_marker,
        buttons,
        confirm: None,
    });
}

/// Row counts beyond what a terminal can show saturate
fn to_u16(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Dim everything under the overlay while keeping it legible
fn dim_backdrop(frame: &mut Frame, theme: &Theme, area: Rect) {
    let buf = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_fg(theme.dim).set_bg(theme.backdrop);
            }
        }
    }
}

fn header_lines(content: &DetailContent, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let bg = theme.panel_bg;
    let label_style = Style::default()
        .fg(theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(theme.text).bg(bg);
    let badge_style = Style::default()
        .fg(theme.category_color(&content.category))
        .bg(theme.badge_bg)
        .add_modifier(Modifier::BOLD);

    vec![
        Line::from(Span::styled(
            unicode::truncate_to_width(&content.title, width),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(format!(" {} ", content.category_label), badge_style)),
        Line::from(vec![
            Span::styled("최종 수정: ", label_style),
            Span::styled(content.updated.clone(), value_style),
        ]),
        Line::from(vec![
            Span::styled("생성: ", label_style),
            Span::styled(content.created.clone(), value_style),
        ]),
        separator(theme, width),
    ]
}

/// Tag badges packed into rows. Empty when the memo has no tags.
fn tag_lines(content: &DetailContent, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let badge = Style::default().fg(theme.text).bg(theme.badge_bg);
    let gap = Style::default().bg(theme.panel_bg);
    unicode::pack_rows(&content.tags, 2, width)
        .into_iter()
        .map(|row| {
            let mut spans = Vec::new();
            for (i, tag) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("  ", gap));
                }
                spans.push(Span::styled(tag.to_string(), badge));
            }
            Line::from(spans)
        })
        .collect()
}

fn separator(theme: &Theme, width: usize) -> Line<'static> {
    Line::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.dim).bg(theme.panel_bg),
    )
}

/// Separator plus right-aligned buttons. Returns each button's screen rect.
fn render_footer(
    frame: &mut Frame,
    theme: &Theme,
    focus: DetailButton,
    area: Rect,
) -> Vec<(DetailButton, Rect)> {
    if area.height == 0 {
        return Vec::new();
    }
    let bg = theme.panel_bg;
    frame.render_widget(
        Paragraph::new(separator(theme, area.width as usize)),
        Rect { height: 1, ..area },
    );
    if area.height < 2 {
        return Vec::new();
    }
    let row_y = area.y + 1;

    let spans: Vec<(DetailButton, Span<'static>)> = DetailButton::ALL
        .iter()
        .map(|&button| {
            let fg = match button {
                DetailButton::Edit => theme.blue,
                DetailButton::Delete => theme.red,
                DetailButton::Close => theme.text,
            };
            let style = if button == focus {
                Style::default().fg(bg).bg(fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(fg).bg(bg)
            };
            (button, Span::styled(format!("[{}]", button.label()), style))
        })
        .collect();

    let only_spans: Vec<Span> = spans.iter().map(|(_, s)| s.clone()).collect();
    let total = spans_width(&only_spans) + spans.len().saturating_sub(1);
    let mut x = area.x + (area.width as usize).saturating_sub(total) as u16;

    let mut rects = Vec::new();
    for (button, span) in spans {
        let w = (unicode::display_width(&span.content) as u16).min(area.right().saturating_sub(x));
        let rect = Rect::new(x, row_y, w, 1);
        frame.render_widget(Paragraph::new(Line::from(span)), rect);
        rects.push((button, rect));
        x = x.saturating_add(w + 1);
    }
    rects
}
