//! UI rendering for qchat
//!
//! Two screens:
//! - Auth: login/signup form
//! - Chat: conversation sidebar on the left, chat history and input on the
//!   right, footer with status or keybind hints

mod auth_form;
mod chat;
mod helpers;
mod input;
mod sidebar;
mod theme;

pub use chat::{message_lines, wrap_line, APP_TITLE};
pub use helpers::truncate_string;
pub use input::INPUT_PLACEHOLDER;

use ratatui::{prelude::*, Frame};

use crate::app::{App, Screen};
use auth_form::render_auth_screen;
use chat::render_chat;
use input::{render_footer, render_input};
use sidebar::render_sidebar;

/// Sidebar width on wide terminals
const SIDEBAR_WIDTH: u16 = 32;
/// Below this the sidebar takes a third of the width
const NARROW_WIDTH: u16 = 80;

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI based on current screen
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Auth => render_auth_screen(frame, app),
        Screen::Chat => render_chat_screen(frame, app),
    }
}

fn render_chat_screen(frame: &mut Frame, app: &App) {
    let [main_area, footer_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(frame.area());

    let sidebar_width = if main_area.width < NARROW_WIDTH {
        main_area.width / 3
    } else {
        SIDEBAR_WIDTH
    };
    let [sidebar_area, chat_column] =
        Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(20)])
            .areas(main_area);
    let [chat_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(chat_column);

    render_sidebar(frame, sidebar_area, app);
    render_chat(frame, chat_area, app);
    render_input(frame, input_area, app);
    render_footer(frame, footer_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests_support::test_app;
    use crate::auth::Credentials;
    use crate::models::Conversation;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        screen_text(&terminal)
    }

    #[tokio::test]
    async fn test_render_auth_screen() {
        let mut app = test_app();
        app.auth_form.email = "a@b.c".to_string();
        app.auth_form.password = "secret".to_string();
        let text = draw(&app);

        assert!(text.contains("Sign in"));
        assert!(text.contains("a@b.c"));
        assert!(!text.contains("secret"));
    }

    #[tokio::test]
    async fn test_render_chat_empty_state() {
        let mut app = test_app();
        app.sign_in(Credentials::from_login("tok", "bearer", "a@b.c"));
        let text = draw(&app);

        assert!(text.contains(APP_TITLE));
        assert!(text.contains("How can I assist you today?"));
        assert!(text.contains("New Consultation"));
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(text.contains("a@b.c"));
    }

    #[tokio::test]
    async fn test_render_conversation_messages() {
        let mut app = test_app();
        app.sign_in(Credentials::from_login("tok", "bearer", "a@b.c"));
        let conversation: Conversation =
            serde_json::from_value(serde_json::json!({"id": "c1", "title": "Sleep"})).unwrap();
        app.chat.add_conversation(conversation);
        app.chat.set_messages("c1", Vec::new());
        app.chat.begin_send("How do I sleep better?").unwrap();
        app.chat.apply_stream_data("c1", "Keep a **regular** schedule.");
        let text = draw(&app);

        assert!(text.contains("Sleep"));
        assert!(text.contains("How do I sleep better?"));
        assert!(text.contains("Keep a regular schedule."));
    }
}
