use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/signup` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
}

/// `GET /auth/users/me` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
}

/// One entry of a validation failure (`422`) body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

/// `detail` is a plain string for most errors and a list for validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
    Other(serde_json::Value),
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

impl ErrorResponse {
    /// Human-readable text for the error
    pub fn message(&self) -> String {
        match &self.detail {
            ErrorDetail::Message(message) => message.clone(),
            ErrorDetail::Validation(issues) => issues
                .iter()
                .map(|issue| {
                    let field = issue
                        .loc
                        .last()
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    if field.is_empty() {
                        issue.msg.clone()
                    } else {
                        format!("{}: {}", field, issue.msg)
                    }
                })
                .collect::<Vec<_>>()
                .join("; "),
            ErrorDetail::Other(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_string_detail() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Incorrect email or password"}"#).unwrap();
        assert_eq!(err.message(), "Incorrect email or password");
    }

    #[test]
    fn test_error_response_validation_detail() {
        let json = r#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "password"], "msg": "field required", "type": "missing"}
        ]}"#;
        let err: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            err.message(),
            "email: value is not a valid email address; password: field required"
        );
    }

    #[test]
    fn test_login_response_default_token_type() {
        let resp: LoginResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn test_login_request_serialization() {
        let req = LoginRequest {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.c", "password": "pw"}));
    }
}
