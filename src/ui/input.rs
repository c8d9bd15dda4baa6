//! Message input box and the footer line

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use super::helpers::truncate_string;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ERROR};
use crate::app::{App, Focus};

pub const INPUT_PLACEHOLDER: &str = "What's in your mind...";

pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Input && app.chat.renaming.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            COLOR_BORDER_FOCUSED
        } else {
            COLOR_BORDER
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if app.input.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT)));
        }
        spans.push(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(COLOR_DIM)));
        Line::from(spans)
    } else {
        let shown = input_tail(&app.input, (inner.width as usize).saturating_sub(1));
        let mut spans = vec![Span::raw(shown)];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT)));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), inner);
}

/// The end of the input that fits in `width` columns, newlines shown as `⏎`
pub fn input_tail(input: &str, width: usize) -> String {
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for c in input.chars().rev() {
        let c = if c == '\n' { '⏎' } else { c };
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        tail.push(c);
    }
    tail.into_iter().rev().collect()
}

/// Status message, or keybind hints for the focused panel
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(status) = &app.status {
        Line::styled(
            truncate_string(status, area.width as usize),
            Style::default().fg(COLOR_ERROR),
        )
    } else {
        Line::styled(keybind_hints(app), Style::default().fg(COLOR_DIM))
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn keybind_hints(app: &App) -> &'static str {
    if app.chat.renaming.is_some() {
        return "[Enter] Save  [Esc] Cancel";
    }
    match app.focus {
        Focus::Sidebar => {
            "[↑↓] Select  [Enter] Open  [r] Rename  [d] Delete  [Ctrl+N] New  [Tab] Input  [Ctrl+L] Log out  [Ctrl+C] Quit"
        }
        Focus::Input if app.is_streaming() => "[Esc] Stop response  [PgUp/PgDn] Scroll  [Tab] Sidebar",
        Focus::Input => "[Enter] Send  [PgUp/PgDn] Scroll  [Tab] Sidebar  [Ctrl+C] Quit",
    }
}
