//! Unified error type for qchat.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::api::ApiError;

/// Every error the app can surface, with categorization and user text.
#[derive(Debug)]
pub enum QchatError {
    Network(NetworkError),
    Auth(AuthError),
    Stream(StreamError),
    Api(ApiError),
    Config { message: String },
    Io(std::io::Error),
}

impl QchatError {
    pub fn config(message: impl Into<String>) -> Self {
        QchatError::Config {
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            QchatError::Network(_) => ErrorCategory::Network,
            QchatError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::User
                }
            }
            QchatError::Stream(err) => match err {
                StreamError::Transport { .. }
                | StreamError::Timeout { .. }
                | StreamError::UnexpectedEof => ErrorCategory::Network,
                StreamError::Backend { .. } => ErrorCategory::Server,
                StreamError::Malformed { .. } => ErrorCategory::Client,
                StreamError::Cancelled => ErrorCategory::User,
            },
            QchatError::Api(err) => match err {
                ApiError::Http(_) => ErrorCategory::Network,
                ApiError::Unauthorized => ErrorCategory::Auth,
                ApiError::Server { status: 401, .. } => ErrorCategory::Auth,
                ApiError::Server { status, .. } if *status >= 500 => ErrorCategory::Server,
                ApiError::Server { .. } => ErrorCategory::User,
                ApiError::Json(_) => ErrorCategory::Client,
            },
            QchatError::Config { .. } => ErrorCategory::Configuration,
            QchatError::Io(_) => ErrorCategory::System,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            QchatError::Network(err) => err.is_retryable(),
            QchatError::Stream(err) => err.is_retryable(),
            QchatError::Api(ApiError::Http(err)) => NetworkError::from(err).is_retryable(),
            _ => self.category().is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            QchatError::Network(err) => err.user_message(),
            QchatError::Auth(err) => err.user_message(),
            QchatError::Stream(err) => err.user_message(),
            QchatError::Api(ApiError::Http(err)) => NetworkError::from(err).user_message(),
            QchatError::Api(err) => err.to_string(),
            QchatError::Config { message } => format!("Configuration error: {}", message),
            QchatError::Io(err) => format!("File error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            QchatError::Network(err) => err.error_code(),
            QchatError::Auth(err) => err.error_code(),
            QchatError::Stream(err) => err.error_code(),
            QchatError::Api(err) => err.error_code(),
            QchatError::Config { .. } => "E_CONFIG",
            QchatError::Io(_) => "E_IO",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error requires logging in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            QchatError::Auth(err) => err.requires_reauth(),
            QchatError::Api(err) => err.is_unauthorized(),
            QchatError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for QchatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QchatError::Network(err) => write!(f, "{}", err),
            QchatError::Auth(err) => write!(f, "{}", err),
            QchatError::Stream(err) => write!(f, "{}", err),
            QchatError::Api(err) => write!(f, "{}", err),
            QchatError::Config { message } => write!(f, "Configuration error: {}", message),
            QchatError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for QchatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QchatError::Network(err) => Some(err),
            QchatError::Auth(err) => Some(err),
            QchatError::Stream(err) => Some(err),
            QchatError::Api(err) => Some(err),
            QchatError::Config { .. } => None,
            QchatError::Io(err) => Some(err),
        }
    }
}

impl From<NetworkError> for QchatError {
    fn from(err: NetworkError) -> Self {
        QchatError::Network(err)
    }
}

impl From<AuthError> for QchatError {
    fn from(err: AuthError) -> Self {
        QchatError::Auth(err)
    }
}

impl From<StreamError> for QchatError {
    fn from(err: StreamError) -> Self {
        QchatError::Stream(err)
    }
}

impl From<ApiError> for QchatError {
    fn from(err: ApiError) -> Self {
        QchatError::Api(err)
    }
}

impl From<std::io::Error> for QchatError {
    fn from(err: std::io::Error) -> Self {
        QchatError::Io(err)
    }
}

impl From<reqwest::Error> for QchatError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        QchatError::Network(super::network::classify_reqwest_error(&err, &url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpError;

    #[test]
    fn test_api_error_categories() {
        let err: QchatError = ApiError::Server {
            status: 503,
            detail: "down".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);
        assert!(err.is_retryable());

        let err: QchatError = ApiError::Server {
            status: 401,
            detail: "Could not validate credentials".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert!(err.requires_reauth());

        let err: QchatError = ApiError::Server {
            status: 400,
            detail: "Email already registered".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_http_error_is_network() {
        let err: QchatError =
            ApiError::Http(HttpError::ConnectionFailed("refused".to_string())).into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert!(err.user_message().contains("Unable to connect"));
    }

    #[test]
    fn test_stream_error_categories() {
        let err: QchatError = StreamError::UnexpectedEof.into();
        assert_eq!(err.category(), ErrorCategory::Network);
        let err: QchatError = StreamError::Cancelled.into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
        let err: QchatError = StreamError::Backend {
            message: "x".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_auth_error_category() {
        let err: QchatError = AuthError::TokenExpired.into();
        assert_eq!(err.category(), ErrorCategory::Auth);
        let err: QchatError = AuthError::InvalidCredentials {
            detail: "bad".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::User);
    }

    #[test]
    fn test_io_and_config() {
        let err: QchatError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.error_code(), "E_IO");
        assert!(std::error::Error::source(&err).is_some());

        let err = QchatError::config("bad url");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("bad url"));
    }

    #[test]
    fn test_reqwest_builder_error_is_network() {
        let err = reqwest::Client::new().get("::bad").build().unwrap_err();
        let err: QchatError = err.into();
        assert!(matches!(
            err,
            QchatError::Network(NetworkError::Other { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(!err.is_retryable());
    }
}
