//! Error handling for qchat.
//!
//! - **Error categories**: high-level classification for handling decisions
//! - **Domain errors**: network, auth and stream errors
//! - **Unified error type**: `QchatError` wraps all of them plus API errors
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped stream | Yes |
//! | Auth | Missing or expired login | No |
//! | Server | 5xx, backend `Error:` frames | Yes |
//! | Client | Unexpected response data | No |
//! | User | Rejected input, cancelled stream | No |
//! | System | Filesystem errors | No |
//! | Configuration | Invalid settings | No |

mod auth;
mod category;
mod network;
mod qchat_error;
mod result;
mod stream;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use network::{classify_reqwest_error, NetworkError};
pub use qchat_error::QchatError;
pub use result::QchatResult;
pub use stream::StreamError;
