//! REST actions. Each spawns a task and reports back with an [`AppMessage`].

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::api::ApiError;
use crate::auth::Credentials;
use crate::error::{AuthError, QchatError};
use crate::state::AuthMode;

use super::{App, AppMessage, Focus, Screen};

/// `RequestFailed` for an API error
fn request_failed(err: ApiError) -> AppMessage {
    let unauthorized = err.is_unauthorized();
    let err = QchatError::from(err);
    warn!("Request failed [{}]: {}", err.error_code(), err);
    AppMessage::RequestFailed {
        error: err.user_message(),
        unauthorized,
    }
}

/// Form text for a failed login or signup
fn auth_failure(err: ApiError, mode: AuthMode) -> String {
    let err = match err {
        ApiError::Server { status, detail } if status < 500 => match mode {
            AuthMode::Login => QchatError::Auth(AuthError::InvalidCredentials { detail }),
            AuthMode::Signup => QchatError::Auth(AuthError::SignupRejected { detail }),
        },
        other => QchatError::from(other),
    };
    warn!("{:?} failed [{}]: {}", mode, err.error_code(), err);
    err.user_message()
}

impl App {
    /// Submit the login or signup form
    pub fn submit_auth(&mut self) {
        let Some((mode, email, password)) = self.auth_form.begin_submit() else {
            self.mark_dirty();
            return;
        };
        self.mark_dirty();

        let auth_api = self.auth_api.clone();
        let store = Arc::clone(&self.credentials_store);
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let message = match mode {
                AuthMode::Login => match auth_api.login(&email, &password).await {
                    Ok(login) => {
                        // The profile is the source of truth for the email shown
                        let email = match auth_api.profile(&login.access_token).await {
                            Ok(profile) => profile.email,
                            Err(e) => {
                                warn!("Profile lookup failed, keeping typed email: {}", e);
                                email
                            }
                        };
                        let credentials =
                            Credentials::from_login(&login.access_token, &login.token_type, &email);
                        if let Err(e) = store.save(&credentials).await {
                            let err = AuthError::CredentialsSaveFailed {
                                message: e.to_string(),
                            };
                            error!("[{}] {}", err.error_code(), err);
                        }
                        AppMessage::LoggedIn(credentials)
                    }
                    Err(e) => AppMessage::LoginFailed(auth_failure(e, mode)),
                },
                AuthMode::Signup => match auth_api.signup(&email, &password).await {
                    Ok(signup) => AppMessage::SignedUp {
                        email: signup.email,
                    },
                    Err(e) => AppMessage::SignupFailed(auth_failure(e, mode)),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Fetch the conversation list
    pub fn load_conversations(&mut self) {
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match client.list_conversations().await {
                Ok(conversations) => AppMessage::ConversationsLoaded(conversations),
                Err(e) => request_failed(e),
            };
            let _ = tx.send(message);
        });
    }

    /// Create a conversation; it becomes active when the server answers
    pub fn create_conversation(&mut self) {
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match client.create_conversation().await {
                Ok(conversation) => AppMessage::ConversationCreated(conversation),
                Err(e) => request_failed(e),
            };
            let _ = tx.send(message);
        });
    }

    /// Activate the highlighted conversation and fetch its messages
    pub fn open_selected_conversation(&mut self) {
        if let Some(id) = self.chat.activate_selected() {
            self.scroll_offset = 0;
            self.load_messages(&id);
        }
        if self.chat.active_id.is_some() {
            self.focus = Focus::Input;
        }
        self.mark_dirty();
    }

    pub fn load_messages(&mut self, conversation_id: &str) {
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        let conversation_id = conversation_id.to_string();
        tokio::spawn(async move {
            let message = match client.get_messages(&conversation_id).await {
                Ok(messages) => AppMessage::MessagesLoaded {
                    conversation_id,
                    messages,
                },
                Err(e) => {
                    warn!("Loading messages for {} failed: {}", conversation_id, e);
                    AppMessage::MessagesLoadError {
                        conversation_id,
                        error: QchatError::from(e).user_message(),
                    }
                }
            };
            let _ = tx.send(message);
        });
    }

    /// Save the in-place rename, if anything changed
    pub fn commit_rename(&mut self) {
        self.mark_dirty();
        let Some((id, title)) = self.chat.commit_rename() else {
            return;
        };
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match client.rename_conversation(&id, &title).await {
                Ok(updated) => AppMessage::ConversationRenamed {
                    title: updated.map(|c| c.title).unwrap_or(title),
                    id,
                },
                Err(e) => request_failed(e),
            };
            let _ = tx.send(message);
        });
    }

    /// Delete the highlighted conversation
    pub fn delete_selected_conversation(&mut self) {
        let Some(id) = self.chat.selected_conversation().map(|c| c.id.clone()) else {
            return;
        };
        if let Some(handle) = self.active_streams.remove(&id) {
            handle.cancel();
        }
        let client = self.chat_api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match client.delete_conversation(&id).await {
                Ok(()) => AppMessage::ConversationDeleted { id },
                Err(e) => request_failed(e),
            };
            let _ = tx.send(message);
        });
    }

    /// Drop the session and go back to the login form
    pub fn logout(&mut self) {
        info!("Signing out");
        self.cancel_all_streams();
        self.chat_api.set_token(None);
        let email = self
            .credentials
            .take()
            .and_then(|c| c.email)
            .unwrap_or_default();
        self.chat.reset();
        self.input.clear();
        self.status = None;
        self.auth_form.reset();
        self.auth_form.email = email;
        self.screen = Screen::Auth;
        self.mark_dirty();

        let store = Arc::clone(&self.credentials_store);
        tokio::spawn(async move {
            if let Err(e) = store.clear().await {
                error!("{}", e);
            }
        });
    }
}
