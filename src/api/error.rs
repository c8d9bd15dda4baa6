//! Errors returned by the REST and streaming wrappers.

use thiserror::Error;

use crate::models::ErrorResponse;
use crate::traits::HttpError;

/// Error type for chat and auth API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("{0}")]
    Http(HttpError),

    /// Non-2xx response; `detail` comes from the error body when it parses
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response from server: {0}")]
    Json(#[from] serde_json::Error),

    /// No access token available for an authenticated call
    #[error("Not signed in")]
    Unauthorized,
}

impl ApiError {
    /// Build a `Server` error from a status and raw body
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorResponse>(body)
            .map(|err| err.message())
            .ok()
            .filter(|detail| !detail.is_empty())
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Server { status, detail }
    }

    /// HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the user has to sign in again
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized | ApiError::Server { status: 401, .. }
        )
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Http(_) => "E_API_HTTP",
            ApiError::Server { .. } => "E_API_STATUS",
            ApiError::Json(_) => "E_API_JSON",
            ApiError::Unauthorized => "E_API_UNAUTHORIZED",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => {
                ApiError::from_response(status, message.as_bytes())
            }
            other => ApiError::Http(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_with_detail() {
        let err = ApiError::from_response(400, br#"{"detail": "Email already registered"}"#);
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_from_response_plain_text() {
        let err = ApiError::from_response(502, b"Bad Gateway");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ApiError::from_response(500, b"");
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_server_http_error_maps_to_server() {
        let err: ApiError = HttpError::ServerError {
            status: 401,
            message: r#"{"detail": "Could not validate credentials"}"#.to_string(),
        }
        .into();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Could not validate credentials");
    }

    #[test]
    fn test_transport_error_kept() {
        let err: ApiError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.error_code(), "E_API_HTTP");
        assert_eq!(err.to_string(), "Connection failed: refused");
    }
}
