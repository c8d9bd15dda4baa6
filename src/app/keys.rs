//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Focus, Screen};

/// Rows moved per PageUp/PageDown
const SCROLL_STEP: usize = 10;

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Printable character without Ctrl/Alt
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

impl App {
    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if is_ctrl(&key, 'c') {
            self.quit();
            return;
        }

        match self.screen {
            Screen::Auth => self.handle_auth_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    /// Paste into whatever field has focus
    pub fn handle_paste(&mut self, text: &str) {
        self.mark_dirty();
        match self.screen {
            Screen::Auth => self.auth_form.insert_str(text),
            Screen::Chat => {
                if let Some(rename) = self.chat.renaming.as_mut() {
                    rename.title.push_str(&text.replace(['\r', '\n'], " "));
                } else if self.focus == Focus::Input {
                    self.input.push_str(&text.replace("\r\n", "\n"));
                }
            }
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        if is_ctrl(&key, 's') {
            self.auth_form.toggle_mode();
            return;
        }
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.auth_form.next_field()
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => self.auth_form.backspace(),
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.auth_form.insert_char(c);
                }
            }
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        if self.chat.renaming.is_some() {
            self.handle_rename_key(key);
            return;
        }

        if is_ctrl(&key, 'n') {
            self.create_conversation();
            return;
        }
        if is_ctrl(&key, 'l') {
            self.logout();
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return;
            }
            KeyCode::Esc => {
                if !self.cancel_active_stream() {
                    self.status = None;
                }
                return;
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
                return;
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Input => self.handle_input_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.chat.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.chat.select_next(),
            KeyCode::Enter => self.open_selected_conversation(),
            KeyCode::F(2) | KeyCode::Char('r') => {
                self.chat.start_rename();
            }
            KeyCode::Delete | KeyCode::Char('d') => self.delete_selected_conversation(),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.send_message(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.input.push(c);
                }
            }
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        let Some(rename) = self.chat.renaming.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => self.commit_rename(),
            KeyCode::Esc => self.chat.cancel_rename(),
            KeyCode::Backspace => {
                rename.title.pop();
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    rename.title.push(c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::test_app;
    use super::*;
    use crate::auth::Credentials;
    use crate::models::Conversation;
    use crate::state::AuthMode;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in_app() -> App {
        let mut app = test_app();
        app.sign_in(Credentials::from_login("tok", "bearer", "a@b.c"));
        let conversations: Vec<Conversation> = serde_json::from_value(serde_json::json!([
            {"id": "a", "title": "First"},
            {"id": "b", "title": "Second"}
        ]))
        .unwrap();
        app.chat.set_conversations(conversations);
        app
    }

    #[tokio::test]
    async fn test_auth_form_keys() {
        let mut app = test_app();
        type_text(&mut app, "a@b.c");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        ctrl(&mut app, 's');

        assert_eq!(app.auth_form.email, "a@b.c");
        assert_eq!(app.auth_form.mode, AuthMode::Signup);
        // Switching mode clears the password
        assert!(app.auth_form.password.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_anywhere() {
        let mut app = signed_in_app();
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_sidebar_navigation_and_open() {
        let mut app = signed_in_app();
        assert_eq!(app.focus, Focus::Sidebar);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Input);
        assert!(app.chat.active_id.is_some());
        assert!(app.chat.loading_messages);
    }

    #[tokio::test]
    async fn test_rename_keys() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::F(2));
        assert!(app.chat.renaming.is_some());

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "X");
        let title = app.chat.renaming.as_ref().unwrap().title.clone();
        assert!(title.ends_with('X'));

        press(&mut app, KeyCode::Esc);
        assert!(app.chat.renaming.is_none());
    }

    #[tokio::test]
    async fn test_input_and_blank_send() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat.messages.is_empty());
        assert_eq!(app.input, "   ");
    }

    #[tokio::test]
    async fn test_tab_toggles_focus() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[tokio::test]
    async fn test_page_keys_scroll_history() {
        let mut app = signed_in_app();
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll_offset, 20);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_ctrl_l_logs_out() {
        let mut app = signed_in_app();
        ctrl(&mut app, 'l');
        assert_eq!(app.screen, Screen::Auth);
        assert!(app.chat.conversations.is_empty());
    }
}
