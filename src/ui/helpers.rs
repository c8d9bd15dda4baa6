//! Helper functions and constants for UI rendering

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Spinner frames shown while waiting on the backend
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the current tick
pub fn spinner(tick_count: u64) -> &'static str {
    // Ticks run at ~60fps, advance the spinner every 5
    SPINNER_FRAMES[((tick_count / 5) % SPINNER_FRAMES.len() as u64) as usize]
}

/// Truncate to `max_width` display columns, ending with `…` when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer title", 8), "a longe…");
        assert_eq!(truncate_string("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_string("健康健康", 5), "健康…");
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner(5), SPINNER_FRAMES[1]);
        assert_eq!(spinner(50), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(area, 40, 10);
        assert_eq!(rect, Rect::new(30, 15, 40, 10));

        // Clamped to the available area
        let rect = centered_rect(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
