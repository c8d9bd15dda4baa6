use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    deserialize_id, deserialize_nullable_id, deserialize_nullable_string, deserialize_timestamp,
    Message,
};

/// Title shown for conversations the user has not named yet
pub const DEFAULT_CONVERSATION_TITLE: &str = "New conversation";

/// A conversation as listed by `GET /chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Empty until the user or server names it
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_id")]
    pub user_id: String,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub document_id: Option<String>,
}

impl Conversation {
    /// Title for display, falling back to the default for untitled ones
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_CONVERSATION_TITLE
        } else {
            &self.title
        }
    }
}

/// `GET /chat/{id}` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationWithMessages {
    #[serde(flatten)]
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Vec<Message>,
}
