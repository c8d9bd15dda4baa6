//! REST and streaming wrappers for the chat backend.
//!
//! - `auth` - login, signup and profile
//! - `client` - conversations, messages and the chat stream
//! - `error` - `ApiError`

mod auth;
mod client;
mod error;
mod request;

pub use auth::AuthApiClient;
pub use client::ChatApiClient;
pub use error::ApiError;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
