//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which UI component has focus
//! - [`AppMessage`] - Messages for async communication
//!
//! Network work runs in spawned tokio tasks that report back over
//! `message_tx`; the UI loop feeds them to [`App::handle_message`].

mod actions;
mod handlers;
mod keys;
mod messages;
mod stream;
mod types;

pub use messages::AppMessage;
pub use types::{Focus, Screen};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{AuthApiClient, ChatApiClient};
use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::sse::CancelHandle;
use crate::state::{AuthForm, ChatState};
use crate::traits::{CredentialsProvider, HttpClient};

/// Main application state
pub struct App {
    pub screen: Screen,
    pub focus: Focus,
    pub auth_form: AuthForm,
    pub chat: ChatState,
    /// Chat input line
    pub input: String,
    /// Rows scrolled up from the bottom of the history
    pub scroll_offset: usize,
    /// Signed-in user, `None` on the auth screen
    pub credentials: Option<Credentials>,
    /// One-line notice shown in the footer
    pub status: Option<String>,
    pub should_quit: bool,
    /// Redraw on the next loop iteration
    pub needs_redraw: bool,
    /// Incremented every UI tick, drives the spinner
    pub tick_count: u64,
    /// Taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    auth_api: AuthApiClient,
    chat_api: ChatApiClient,
    credentials_store: Arc<dyn CredentialsProvider>,
    stream_idle_timeout: Option<Duration>,
    /// Cancel handles of turns in flight, by conversation id
    active_streams: HashMap<String, CancelHandle>,
}

impl App {
    pub fn new(
        config: &ClientConfig,
        http: Arc<dyn HttpClient>,
        credentials_store: Arc<dyn CredentialsProvider>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            screen: Screen::Auth,
            focus: Focus::default(),
            auth_form: AuthForm::new(),
            chat: ChatState::new(),
            input: String::new(),
            scroll_offset: 0,
            credentials: None,
            status: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            auth_api: AuthApiClient::new(Arc::clone(&http), &config.api_url),
            chat_api: ChatApiClient::new(http, &config.api_url),
            credentials_store,
            stream_idle_timeout: config.stream_idle_timeout,
            active_streams: HashMap::new(),
        }
    }

    /// Pick up stored credentials from a previous run.
    ///
    /// A valid token goes straight to the chat screen. An expired one keeps
    /// the email and asks to sign in again.
    pub async fn restore_session(&mut self) {
        match self.credentials_store.load().await {
            Ok(Some(credentials)) if credentials.is_valid() => {
                info!("Restored session for {:?}", credentials.email);
                self.sign_in(credentials);
            }
            Ok(Some(credentials)) => {
                info!("Stored token expired");
                self.auth_form.email = credentials.email.unwrap_or_default();
                self.auth_form.error = Some(AuthError::TokenExpired.user_message());
            }
            Ok(None) => {}
            Err(e) => warn!("Could not load credentials: {}", e),
        }
        self.mark_dirty();
    }

    /// Switch to the chat screen with `credentials` and load conversations
    pub(crate) fn sign_in(&mut self, credentials: Credentials) {
        self.chat_api.set_token(credentials.access_token.clone());
        self.credentials = Some(credentials);
        self.auth_form.reset();
        self.chat.reset();
        self.input.clear();
        self.scroll_offset = 0;
        self.status = None;
        self.screen = Screen::Chat;
        self.focus = Focus::Sidebar;
        self.load_conversations();
    }

    /// Email of the signed-in user
    pub fn user_email(&self) -> Option<&str> {
        self.credentials.as_ref()?.email.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.credentials.is_some() && self.chat_api.has_token()
    }

    /// Whether the active conversation has a turn in flight
    pub fn is_streaming(&self) -> bool {
        self.chat.active_is_streaming()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_streaming() || self.chat.loading_messages || self.auth_form.submitting {
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.cancel_all_streams();
        self.should_quit = true;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.mark_dirty();
    }
}
