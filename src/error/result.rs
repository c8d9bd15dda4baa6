//! Result type alias for qchat operations.

use super::qchat_error::QchatError;

/// Type alias for Results using QchatError.
pub type QchatResult<T> = Result<T, QchatError>;
