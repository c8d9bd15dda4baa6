//! Message handling for the App.

use tracing::{debug, info};

use crate::error::AuthError;

use super::{App, AppMessage, Focus, Screen};

impl App {
    /// Handle an incoming async message
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::LoggedIn(credentials) => {
                info!("Signed in as {:?}", credentials.email);
                self.sign_in(credentials);
            }
            AppMessage::LoginFailed(error) | AppMessage::SignupFailed(error) => {
                self.auth_form.fail(error);
            }
            AppMessage::SignedUp { email } => {
                self.auth_form.signed_up(&email);
            }
            AppMessage::ConversationsLoaded(conversations) => {
                if self.screen == Screen::Chat {
                    self.chat.set_conversations(conversations);
                }
            }
            AppMessage::ConversationCreated(conversation) => {
                let id = conversation.id.clone();
                self.chat.add_conversation(conversation);
                self.scroll_offset = 0;
                self.load_messages(&id);
                self.focus = Focus::Input;
            }
            AppMessage::ConversationRenamed { id, title } => {
                self.chat.apply_rename(&id, &title);
            }
            AppMessage::ConversationDeleted { id } => {
                self.stream_finished(&id);
                self.chat.remove_conversation(&id);
            }
            AppMessage::MessagesLoaded {
                conversation_id,
                messages,
            } => {
                self.chat.set_messages(&conversation_id, messages);
            }
            AppMessage::MessagesLoadError {
                conversation_id,
                error,
            } => {
                self.chat.messages_failed(&conversation_id);
                self.status = Some(error);
            }
            AppMessage::StreamData {
                conversation_id,
                accumulated,
            } => {
                self.chat.apply_stream_data(&conversation_id, &accumulated);
            }
            AppMessage::StreamError {
                conversation_id,
                error,
            } => {
                self.chat.apply_stream_error(&conversation_id, &error);
            }
            AppMessage::StreamFinished {
                conversation_id,
                state,
            } => {
                debug!("Turn in {} finished: {:?}", conversation_id, state);
                self.stream_finished(&conversation_id);
                // Completed turns are replaced by the stored copies
                if self.chat.finish_stream(&conversation_id, state) {
                    self.load_messages(&conversation_id);
                }
            }
            AppMessage::RequestFailed {
                error,
                unauthorized,
            } => {
                if unauthorized && self.screen == Screen::Chat {
                    self.logout();
                    self.auth_form.error = Some(AuthError::TokenExpired.user_message());
                } else {
                    self.status = Some(error);
                }
            }
        }
    }
}
