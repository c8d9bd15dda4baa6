use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    deserialize_id, deserialize_nullable_id, deserialize_nullable_string, deserialize_timestamp,
};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    #[serde(other)]
    Unknown,
}

/// Delivery state of a message. Unrecognized values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageStatus {
    Pending,
    #[default]
    Success,
    Error,
    Other(String),
}

impl From<String> for MessageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => MessageStatus::Pending,
            "success" => MessageStatus::Success,
            "error" => MessageStatus::Error,
            _ => MessageStatus::Other(value),
        }
    }
}

impl From<MessageStatus> for String {
    fn from(status: MessageStatus) -> Self {
        match status {
            MessageStatus::Pending => "pending".to_string(),
            MessageStatus::Success => "success".to_string(),
            MessageStatus::Error => "error".to_string(),
            MessageStatus::Other(value) => value,
        }
    }
}

/// A chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    pub role: MessageRole,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_nullable_id")]
    pub conversation_id: String,
    #[serde(default)]
    pub status: MessageStatus,
}

impl Message {
    fn local(conversation_id: &str, role: MessageRole, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: format!("local-{}", Uuid::new_v4()),
            content,
            role,
            created_at: now,
            updated_at: now,
            conversation_id: conversation_id.to_string(),
            status: MessageStatus::Pending,
        }
    }

    /// User message shown before the server has stored it
    pub fn optimistic_user(conversation_id: &str, content: &str) -> Self {
        Self::local(conversation_id, MessageRole::User, content.to_string())
    }

    /// Empty assistant message that a stream fills in
    pub fn assistant_placeholder(conversation_id: &str) -> Self {
        Self::local(conversation_id, MessageRole::Assistant, String::new())
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Created locally and not yet replaced by the server copy
    pub fn is_local(&self) -> bool {
        self.id.starts_with("local-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_keeps_unknown() {
        let status: MessageStatus = serde_json::from_str(r#""streaming""#).unwrap();
        assert_eq!(status, MessageStatus::Other("streaming".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""streaming""#);

        let status: MessageStatus = serde_json::from_str(r#""error""#).unwrap();
        assert_eq!(status, MessageStatus::Error);
    }

    #[test]
    fn test_unknown_role() {
        let role: MessageRole = serde_json::from_str(r#""system""#).unwrap();
        assert_eq!(role, MessageRole::Unknown);
    }

    #[test]
    fn test_local_messages() {
        let user = Message::optimistic_user("c-1", "hello");
        assert!(user.is_user());
        assert!(user.is_local());
        assert_eq!(user.status, MessageStatus::Pending);
        assert_eq!(user.conversation_id, "c-1");

        let assistant = Message::assistant_placeholder("c-1");
        assert_eq!(assistant.role, MessageRole::Assistant);
        assert!(assistant.content.is_empty());
        assert_ne!(user.id, assistant.id);
    }

    #[test]
    fn test_deserialize_minimal_message() {
        let message: Message =
            serde_json::from_str(r#"{"id": 5, "content": "x", "role": "assistant"}"#).unwrap();
        assert_eq!(message.id, "5");
        assert_eq!(message.status, MessageStatus::Success);
        assert!(!message.is_local());
    }
}
