use serde::{Deserialize, Serialize};

/// Body of `POST /chat/{id}/stream`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `PATCH /chat/{id}/rename`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenameConversationRequest {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let json = serde_json::to_string(&ChatRequest::new("Hello")).unwrap();
        assert_eq!(json, r#"{"message":"Hello"}"#);
    }

    #[test]
    fn test_rename_request_serialization() {
        let req = RenameConversationRequest {
            title: "Sleep".to_string(),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"title":"Sleep"}"#);
    }
}
