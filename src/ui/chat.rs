//! Chat view: header, message history and empty states

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

use super::helpers::{spinner, truncate_string};
use super::theme::{
    COLOR_ASSISTANT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SPINNER,
    COLOR_USER,
};
use crate::app::App;
use crate::markdown::render_markdown;
use crate::models::{Message, MessageRole, MessageStatus};

/// Header title when no conversation is active
pub const APP_TITLE: &str = "HealthChat AI";

const EXAMPLE_QUESTIONS: [&str; 3] = [
    "What are the common symptoms of the flu?",
    "How can I improve my sleep quality?",
    "What should a healthy diet look like?",
];

pub fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .chat
        .active_conversation()
        .map(|c| c.display_title())
        .unwrap_or(APP_TITLE);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", truncate_string(title, area.width.saturating_sub(6) as usize)),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    if app.chat.active_id.is_none() {
        render_centered(
            frame,
            inner,
            vec![
                Line::styled(
                    "How can I assist you today?",
                    Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
                ),
                Line::default(),
                Line::styled(
                    "Start a new chat to begin your conversation",
                    Style::default().fg(COLOR_DIM),
                ),
                Line::styled("[Ctrl+N] New Consultation", Style::default().fg(COLOR_DIM)),
            ],
        );
        return;
    }

    if app.chat.loading_messages {
        render_centered(
            frame,
            inner,
            vec![Line::from(vec![
                Span::styled(spinner(app.tick_count), Style::default().fg(COLOR_SPINNER)),
                Span::raw(" Loading…"),
            ])],
        );
        return;
    }

    if app.chat.messages.is_empty() {
        let mut lines = vec![
            Line::styled(
                format!("Welcome to {}", APP_TITLE),
                Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::raw("Feel free to ask me anything about your health concerns."),
            Line::raw("I'm here to help provide medical information and guidance."),
            Line::default(),
        ];
        lines.extend(
            EXAMPLE_QUESTIONS
                .iter()
                .map(|q| Line::styled(format!("“{}”", q), Style::default().fg(COLOR_DIM))),
        );
        render_centered(frame, inner, lines);
        return;
    }

    let width = inner.width as usize;
    let lines: Vec<Line> = message_lines(&app.chat.messages, app.tick_count)
        .iter()
        .flat_map(|line| wrap_line(line, width))
        .collect();

    let height = inner.height as usize;
    let max_top = lines.len().saturating_sub(height);
    let top = max_top.saturating_sub(app.scroll_offset);
    let visible: Vec<Line> = lines.into_iter().skip(top).take(height).collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        row,
    );
}

/// Unwrapped lines for the whole history
pub fn message_lines(messages: &[Message], tick_count: u64) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let (label, color) = match message.role {
            MessageRole::User => ("You", COLOR_USER),
            MessageRole::Assistant | MessageRole::Unknown => ("Assistant", COLOR_ASSISTANT),
        };
        lines.push(Line::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

        match (&message.status, message.role) {
            (MessageStatus::Pending, _) if message.content.is_empty() => {
                lines.push(Line::from(vec![
                    Span::styled(spinner(tick_count), Style::default().fg(COLOR_SPINNER)),
                    Span::styled(" Thinking...", Style::default().fg(COLOR_DIM)),
                ]));
            }
            (MessageStatus::Error, _) => {
                lines.extend(
                    message
                        .content
                        .lines()
                        .map(|l| Line::styled(l.to_string(), Style::default().fg(COLOR_ERROR))),
                );
            }
            (_, MessageRole::User) => {
                lines.extend(message.content.lines().map(|l| Line::raw(l.to_string())));
            }
            _ => lines.extend(render_markdown(&message.content)),
        }
    }
    lines
}

/// Word-wrap a styled line to `width` columns.
///
/// Breaks at the last space that fits, or mid-word when a single word is
/// wider than the line.
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line.clone()];
    }

    let chars: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();

    let mut rows: Vec<Vec<(char, Style)>> = Vec::new();
    let mut current: Vec<(char, Style)> = Vec::new();
    let mut current_width = 0;
    let mut last_space: Option<usize> = None;

    for (c, style) in chars {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            if c == ' ' {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
                last_space = None;
                continue;
            }
            match last_space {
                Some(pos) if pos > 0 => {
                    let rest = current.split_off(pos + 1);
                    current.pop();
                    rows.push(std::mem::replace(&mut current, rest));
                }
                _ => rows.push(std::mem::take(&mut current)),
            }
            current_width = current.iter().map(|(c, _)| c.width().unwrap_or(0)).sum();
            last_space = current.iter().rposition(|(c, _)| *c == ' ');
        }
        if c == ' ' && current.is_empty() && !rows.is_empty() {
            // Drop leading spaces on continuation rows
            continue;
        }
        current.push((c, style));
        current_width += w;
        if c == ' ' {
            last_space = Some(current.len() - 1);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }

    rows.into_iter()
        .map(|row| Line::from(group_spans(row)).style(line.style))
        .collect()
}

fn group_spans(row: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut style: Option<Style> = None;
    for (c, s) in row {
        if style.is_some_and(|current| current != s) {
            spans.push(Span::styled(std::mem::take(&mut text), style.unwrap_or_default()));
        }
        style = Some(s);
        text.push(c);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, style.unwrap_or_default()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn message(role: &str, content: &str, status: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "id": "m", "role": role, "content": content, "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        let line = Line::raw("short");
        let wrapped = wrap_line(&line, 20);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(text(&wrapped[0]), "short");
    }

    #[test]
    fn test_wrap_at_spaces() {
        let line = Line::raw("drink more water daily");
        let wrapped: Vec<String> = wrap_line(&line, 11).iter().map(text).collect();
        assert_eq!(wrapped, vec!["drink more", "water daily"]);
    }

    #[test]
    fn test_wrap_long_word() {
        let line = Line::raw("abcdefghij");
        let wrapped: Vec<String> = wrap_line(&line, 4).iter().map(text).collect();
        assert_eq!(wrapped, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_styles() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::raw("plain "), Span::styled("bold words", bold)]);
        let wrapped = wrap_line(&line, 10);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(text(&wrapped[0]), "plain bold");
        assert_eq!(wrapped[0].spans[1].style, bold);
        assert_eq!(text(&wrapped[1]), "words");
        assert_eq!(wrapped[1].spans[0].style, bold);
    }

    #[test]
    fn test_message_lines_labels_and_placeholder() {
        let messages = vec![
            message("user", "hello", "success"),
            message("assistant", "", "pending"),
        ];
        let lines: Vec<String> = message_lines(&messages, 0).iter().map(text).collect();
        assert_eq!(lines[0], "You");
        assert_eq!(lines[1], "hello");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Assistant");
        assert!(lines[4].ends_with("Thinking..."));
    }

    #[test]
    fn test_message_lines_error_styled() {
        let messages = vec![message("assistant", "Error: boom", "error")];
        let lines = message_lines(&messages, 0);
        assert_eq!(text(&lines[1]), "Error: boom");
        assert_eq!(lines[1].style.fg, Some(COLOR_ERROR));
    }

    #[test]
    fn test_assistant_markdown() {
        let messages = vec![message("assistant", "# Tips\n\n- rest", "success")];
        let lines: Vec<String> = message_lines(&messages, 0).iter().map(text).collect();
        assert_eq!(lines[1], "Tips");
        assert!(lines.iter().any(|l| l == "• rest"));
    }
}
