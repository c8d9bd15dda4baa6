//! File-based credentials provider adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// [`CredentialsProvider`] backed by `<home>/.credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
}

impl FileCredentialsProvider {
    pub fn new(home: &Path) -> Self {
        Self {
            manager: CredentialsManager::new(home),
        }
    }

    pub fn credentials_path(&self) -> &PathBuf {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        // The manager falls back to defaults for a missing or broken file
        let creds = self.manager.load();
        if creds.is_empty() {
            Ok(None)
        } else {
            Ok(Some(creds))
        }
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        self.manager
            .save(creds)
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        self.manager
            .clear()
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_through_provider() {
        let temp_dir = TempDir::new().unwrap();
        let provider = FileCredentialsProvider::new(temp_dir.path());

        assert!(provider.load().await.unwrap().is_none());

        let creds = Credentials::from_login("token", "bearer", "user@example.com");
        provider.save(&creds).await.unwrap();
        assert!(provider.credentials_path().ends_with(".credentials.json"));
        assert_eq!(provider.load().await.unwrap(), Some(creds));

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A file where the home directory should be
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let provider = FileCredentialsProvider::new(&blocker);

        let err = provider.save(&Credentials::new()).await.unwrap_err();
        assert!(matches!(err, CredentialsError::SaveFailed(_)));
    }
}
