//! Streaming-related error types.
//!
//! Terminal failures of a chat stream, plus the two non-terminal
//! conditions (backend error frames and malformed frames) so they can be
//! reported through the same error surface.

use std::fmt;
use std::time::Duration;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Network or HTTP failure while reading the body.
    Transport { message: String },

    /// The consumer cancelled the stream.
    Cancelled,

    /// No chunk arrived within the idle window.
    Timeout { idle: Duration },

    /// The connection closed before the `[DONE]` sentinel.
    UnexpectedEof,

    /// Backend reported an error via an `Error:` frame.
    Backend { message: String },

    /// A frame payload could not be parsed.
    Malformed { payload: String, message: String },
}

impl StreamError {
    /// Terminal errors end the session; nothing is delivered after them.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            StreamError::Backend { .. } | StreamError::Malformed { .. }
        )
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::Transport { .. } | StreamError::Timeout { .. } | StreamError::UnexpectedEof
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Transport { message } => {
                format!("Connection to the server failed: {}", message)
            }
            StreamError::Cancelled => "Response cancelled.".to_string(),
            StreamError::Timeout { idle } => {
                format!(
                    "No response from server for {:?}. The connection may have been lost.",
                    idle
                )
            }
            StreamError::UnexpectedEof => {
                "The server closed the connection before the response finished.".to_string()
            }
            StreamError::Backend { message } => format!("Server error: {}", message),
            StreamError::Malformed { .. } => {
                "Received invalid data from server.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport { .. } => "E_STREAM_TRANSPORT",
            StreamError::Cancelled => "E_STREAM_CANCELLED",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::UnexpectedEof => "E_STREAM_EOF",
            StreamError::Backend { .. } => "E_STREAM_BACKEND",
            StreamError::Malformed { .. } => "E_STREAM_PARSE",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Transport { message } => write!(f, "{}", message),
            StreamError::Cancelled => write!(f, "stream cancelled"),
            StreamError::Timeout { idle } => write!(f, "no data received for {:?}", idle),
            StreamError::UnexpectedEof => write!(f, "stream ended before completion"),
            StreamError::Backend { message } => write!(f, "{}", message),
            StreamError::Malformed { message, .. } => {
                write!(f, "Failed to parse token data: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_is_message() {
        let err = StreamError::Transport {
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "connection reset");
        assert!(err.is_terminal());
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_TRANSPORT");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = StreamError::UnexpectedEof;
        assert_eq!(err.to_string(), "stream ended before completion");
        assert!(err.is_terminal());
        assert_eq!(err.error_code(), "E_STREAM_EOF");
    }

    #[test]
    fn test_cancelled_not_retryable() {
        let err = StreamError::Cancelled;
        assert!(err.is_terminal());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_CANCELLED");
    }

    #[test]
    fn test_non_terminal_variants() {
        let backend = StreamError::Backend {
            message: "rate limited".to_string(),
        };
        assert!(!backend.is_terminal());
        assert_eq!(backend.to_string(), "rate limited");
        assert!(backend.user_message().contains("rate limited"));

        let malformed = StreamError::Malformed {
            payload: "x".to_string(),
            message: "bad json".to_string(),
        };
        assert!(!malformed.is_terminal());
        assert_eq!(malformed.to_string(), "Failed to parse token data: bad json");
    }

    #[test]
    fn test_timeout_user_message() {
        let err = StreamError::Timeout {
            idle: Duration::from_secs(60),
        };
        assert!(err.user_message().contains("60s"));

        let err = StreamError::Timeout {
            idle: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "no data received for 250ms");
    }
}
