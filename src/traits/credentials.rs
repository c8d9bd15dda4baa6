//! Credentials provider trait abstraction.

use async_trait::async_trait;

use crate::auth::Credentials;

/// Credentials operation errors.
#[derive(Debug, Clone)]
pub enum CredentialsError {
    LoadFailed(String),
    SaveFailed(String),
    ClearFailed(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Storage for the signed-in user's token.
///
/// The app only sees this trait, so tests run against
/// [`crate::adapters::InMemoryCredentials`] instead of the home directory.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// `Ok(None)` when nothing is stored
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    async fn clear(&self) -> Result<(), CredentialsError>;
}
