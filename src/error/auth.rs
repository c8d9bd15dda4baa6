//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Login rejected; `detail` is the server's explanation.
    InvalidCredentials { detail: String },

    /// Signup rejected (email taken, validation failure).
    SignupRejected { detail: String },

    /// Stored access token has expired.
    TokenExpired,

    /// No credentials available (user not logged in).
    NotAuthenticated,

    /// Credentials could not be saved.
    CredentialsSaveFailed { message: String },
}

impl AuthError {
    /// Check if this error might be resolved by logging in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, AuthError::TokenExpired | AuthError::NotAuthenticated)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { detail } => detail.clone(),
            AuthError::SignupRejected { detail } => detail.clone(),
            AuthError::TokenExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::CredentialsSaveFailed { .. } => {
                "Could not save your credentials. Please check file permissions.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::SignupRejected { .. } => "E_AUTH_SIGNUP",
            AuthError::TokenExpired => "E_AUTH_TOKEN_EXP",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::CredentialsSaveFailed { .. } => "E_AUTH_CRED_SAVE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials { detail } => write!(f, "{}", detail),
            AuthError::SignupRejected { detail } => write!(f, "{}", detail),
            AuthError::TokenExpired => write!(f, "Access token has expired"),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::CredentialsSaveFailed { message } => {
                write!(f, "Failed to save credentials: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
