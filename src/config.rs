//! Client configuration.
//!
//! Values come from defaults, then `QCHAT_*` environment variables, then
//! command-line flags applied by the caller through the builder methods.
//!
//! # Example
//!
//! ```ignore
//! use qchat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?
//!     .with_api_url("http://localhost:9000/api/v1");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::api::DEFAULT_API_URL;
use crate::error::{QchatError, QchatResult};

pub const ENV_API_URL: &str = "QCHAT_API_URL";
pub const ENV_STREAM_IDLE_TIMEOUT: &str = "QCHAT_STREAM_IDLE_TIMEOUT_SECS";
pub const ENV_REQUEST_TIMEOUT: &str = "QCHAT_REQUEST_TIMEOUT_SECS";
pub const ENV_HOME: &str = "QCHAT_HOME";

const DEFAULT_STREAM_IDLE_TIMEOUT_SECS: u64 = 120;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub api_url: String,
    /// Give up on a chat stream after this long without data; `None` waits forever
    pub stream_idle_timeout: Option<Duration>,
    /// Time limit for non-streaming requests
    pub request_timeout: Duration,
    /// Directory holding credentials and logs
    pub home_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            stream_idle_timeout: Some(Duration::from_secs(DEFAULT_STREAM_IDLE_TIMEOUT_SECS)),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            home_dir: default_home_dir(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `QCHAT_*` environment variables.
    ///
    /// Returns a config error for timeouts that are not whole seconds.
    pub fn from_env() -> QchatResult<Self> {
        let mut config = Self::default();

        if let Some(url) = env_var(ENV_API_URL) {
            config = config.with_api_url(&url);
        }
        if let Some(secs) = env_secs(ENV_STREAM_IDLE_TIMEOUT)? {
            config = config.with_stream_idle_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = env_secs(ENV_REQUEST_TIMEOUT)? {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(home) = env_var(ENV_HOME) {
            config = config.with_home_dir(home);
        }

        Ok(config)
    }

    /// Set the backend URL. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the stream idle timeout. Zero disables it.
    pub fn with_stream_idle_timeout(mut self, timeout: Duration) -> Self {
        self.stream_idle_timeout = if timeout.is_zero() { None } else { Some(timeout) };
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            warn!("Ignoring zero request timeout");
            return self;
        }
        self.request_timeout = timeout;
        self
    }

    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = home.into();
        self
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Directory for log files
    pub fn log_dir(&self) -> PathBuf {
        self.home_dir.join("logs")
    }
}

fn default_home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qchat")
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_secs(name: &str) -> QchatResult<Option<u64>> {
    match env_var(name) {
        Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            QchatError::config(format!("{} must be a whole number of seconds, got '{}'", name, raw))
        }),
        None => Ok(None),
    }
}
