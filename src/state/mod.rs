//! View state for the TUI
//!
//! - `auth` - login/signup form
//! - `chat` - conversation list, active conversation and its messages

pub mod auth;
pub mod chat;

pub use auth::{AuthField, AuthForm, AuthMode};
pub use chat::{ChatState, RenameState};
