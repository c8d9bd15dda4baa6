//! AppMessage enum for async communication within the application.

use crate::auth::Credentials;
use crate::models::{Conversation, Message};
use crate::sse::SessionState;

/// Results of background tasks, delivered to the UI loop
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Login and profile succeeded and credentials are stored
    LoggedIn(Credentials),
    /// Login failed; text for the form
    LoginFailed(String),
    /// Account created
    SignedUp { email: String },
    SignupFailed(String),
    ConversationsLoaded(Vec<Conversation>),
    ConversationCreated(Conversation),
    ConversationRenamed { id: String, title: String },
    ConversationDeleted { id: String },
    MessagesLoaded {
        conversation_id: String,
        messages: Vec<Message>,
    },
    MessagesLoadError {
        conversation_id: String,
        error: String,
    },
    /// Accumulated assistant text so far
    StreamData {
        conversation_id: String,
        accumulated: String,
    },
    /// Backend, parse or transport error during a turn
    StreamError {
        conversation_id: String,
        error: String,
    },
    /// A turn ended, successfully or not
    StreamFinished {
        conversation_id: String,
        state: SessionState,
    },
    /// A REST call failed
    RequestFailed {
        error: String,
        /// The token was rejected; the user has to sign in again
        unauthorized: bool,
    },
}
