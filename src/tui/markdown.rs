//! Markdown → ratatui Lines renderer.
//!
//! Converts a memo body into `Vec<Line<'static>>` for the detail overlay.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Theme;

/// Convert markdown text to styled lines.
pub fn markdown_to_lines(md: &str, theme: &Theme) -> Vec<Line<'static>> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(md, options);
    let base = Style::default().fg(theme.text).bg(theme.panel_bg);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    // Style stack for nested formatting
    let mut style_stack: Vec<Style> = vec![base];
    // One entry per open list: next ordinal for ordered lists
    let mut list_stack: Vec<Option<u64>> = Vec::new();

    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut quote_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush_line(&mut current_spans, &mut lines);
                let style = match level {
                    HeadingLevel::H1 => base.fg(theme.highlight).add_modifier(Modifier::BOLD),
                    HeadingLevel::H2 => base.fg(theme.text_bright).add_modifier(Modifier::BOLD),
                    HeadingLevel::H3 => base.fg(theme.cyan).add_modifier(Modifier::BOLD),
                    _ => base.add_modifier(Modifier::BOLD),
                };
                style_stack.push(style);
            }
            Event::End(TagEnd::Heading(_)) => {
                style_stack.pop();
                flush_line(&mut current_spans, &mut lines);
                lines.push(Line::raw(""));
            }

            Event::Start(Tag::Strong) => {
                let s = current_style(&style_stack);
                style_stack.push(s.add_modifier(Modifier::BOLD));
            }
            Event::Start(Tag::Emphasis) => {
                let s = current_style(&style_stack);
                style_stack.push(s.add_modifier(Modifier::ITALIC));
            }
            Event::Start(Tag::Strikethrough) => {
                let s = current_style(&style_stack);
                style_stack.push(s.add_modifier(Modifier::CROSSED_OUT));
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                style_stack.pop();
            }

            Event::Code(code) => {
                current_spans.push(Span::styled(
                    code.to_string(),
                    base.fg(theme.cyan),
                ));
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                flush_line(&mut current_spans, &mut lines);
                in_code_block = true;
                code_buffer.clear();
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    lines.push(Line::styled(format!("  {}", lang), base.fg(theme.dim)));
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                for code_line in code_buffer.lines() {
                    lines.push(Line::styled(format!("  {}", code_line), base.fg(theme.dim)));
                }
                lines.push(Line::raw(""));
                in_code_block = false;
            }

            Event::Start(Tag::List(start)) => {
                flush_line(&mut current_spans, &mut lines);
                list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                list_stack.pop();
                if list_stack.is_empty() {
                    lines.push(Line::raw(""));
                }
            }
            Event::Start(Tag::Item) => {
                flush_line(&mut current_spans, &mut lines);
                let depth = list_stack.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match list_stack.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{}. ", n);
                        *n += 1;
                        m
                    }
                    _ => "\u{2022} ".to_string(),
                };
                current_spans.push(Span::styled(format!("{indent}{marker}"), base.fg(theme.dim)));
            }
            Event::End(TagEnd::Item) => {
                flush_line(&mut current_spans, &mut lines);
            }
            Event::TaskListMarker(checked) => {
                let mark = if checked { "[x] " } else { "[ ] " };
                current_spans.push(Span::styled(mark, base.fg(theme.dim)));
            }

            Event::Start(Tag::Link { .. }) => {
                style_stack.push(base.fg(theme.blue).add_modifier(Modifier::UNDERLINED));
            }
            Event::End(TagEnd::Link) => {
                style_stack.pop();
            }

            Event::Start(Tag::Paragraph) => {
                if quote_depth > 0 {
                    current_spans.push(quote_prefix(quote_depth, theme));
                }
            }
            Event::End(TagEnd::Paragraph) => {
                flush_line(&mut current_spans, &mut lines);
                if list_stack.is_empty() {
                    lines.push(Line::raw(""));
                }
            }

            Event::Text(text) => {
                if in_code_block {
                    code_buffer.push_str(&text);
                } else {
                    let style = current_style(&style_stack);
                    current_spans.push(Span::styled(text.to_string(), style));
                }
            }
            Event::SoftBreak => {
                current_spans.push(Span::styled(" ", base));
            }
            Event::HardBreak => {
                flush_line(&mut current_spans, &mut lines);
                if quote_depth > 0 {
                    current_spans.push(quote_prefix(quote_depth, theme));
                }
            }

            Event::Rule => {
                flush_line(&mut current_spans, &mut lines);
                lines.push(Line::styled("\u{2500}".repeat(24), base.fg(theme.dim)));
                lines.push(Line::raw(""));
            }

            Event::Start(Tag::BlockQuote) => {
                flush_line(&mut current_spans, &mut lines);
                quote_depth += 1;
                let s = current_style(&style_stack);
                style_stack.push(s.fg(theme.dim).add_modifier(Modifier::ITALIC));
            }
            Event::End(TagEnd::BlockQuote) => {
                flush_line(&mut current_spans, &mut lines);
                quote_depth = quote_depth.saturating_sub(1);
                style_stack.pop();
            }

            _ => {}
        }
    }

    flush_line(&mut current_spans, &mut lines);

    // Trim trailing empty lines
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }

    lines
}

/// Plain-text rendering, used by the CLI
pub fn markdown_to_plain(md: &str) -> Vec<String> {
    markdown_to_lines(md, &Theme::default())
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

fn current_style(stack: &[Style]) -> Style {
    stack.last().copied().unwrap_or_default()
}

fn quote_prefix(depth: usize, theme: &Theme) -> Span<'static> {
    Span::styled("\u{2502} ".repeat(depth), Style::default().fg(theme.dim).bg(theme.panel_bg))
}

fn flush_line(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}
