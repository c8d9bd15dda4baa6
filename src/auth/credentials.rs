//! Credentials storage and management.
//!
//! The bearer token from a successful login is kept in
//! `<home>/.credentials.json` so the next start can skip the login form.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::auth::token::expires_at_for;

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Authentication credentials for the chat API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token sent on every authenticated request.
    pub access_token: Option<String>,
    /// Token type reported by the server (normally "bearer").
    pub token_type: Option<String>,
    /// Token expiration time as Unix timestamp (seconds since epoch).
    pub expires_at: Option<i64>,
    /// Email of the signed-in user.
    pub email: Option<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build credentials for a token just returned by the login endpoint.
    pub fn from_login(access_token: &str, token_type: &str, email: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            token_type: Some(token_type.to_string()),
            expires_at: Some(expires_at_for(access_token)),
            email: Some(email.to_string()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns `true` if the token is expired or has no expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => chrono::Utc::now().timestamp() >= expires_at,
            None => true,
        }
    }

    /// Check if the credentials are valid (has token and not expired).
    pub fn is_valid(&self) -> bool {
        self.has_token() && !self.is_expired()
    }

    /// True when nothing at all is stored
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
            && self.token_type.is_none()
            && self.expires_at.is_none()
            && self.email.is_none()
    }
}

/// Manages credential storage and retrieval.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Manager storing credentials inside `home`
    pub fn new(home: &Path) -> Self {
        Self {
            credentials_path: home.join(CREDENTIALS_FILE),
        }
    }

    pub fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be read.
    pub fn load(&self) -> Credentials {
        if !self.credentials_path.exists() {
            return Credentials::default();
        }

        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Failed to open credentials file: {}", e);
                return Credentials::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(creds) => creds,
            Err(e) => {
                tracing::warn!("Ignoring unreadable credentials file: {}", e);
                Credentials::default()
            }
        }
    }

    /// Save credentials as pretty JSON, creating the parent directory.
    pub fn save(&self, credentials: &Credentials) -> std::io::Result<()> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.credentials_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)?;
        writer.flush()
    }

    /// Remove the credentials file. Succeeds if it does not exist.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.credentials_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
