//! Frame, payload and event types for the chat stream.

/// One line of a frame, classified by its SSE field name.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// `event: <name>` line
    Event(String),
    /// `data: <payload>` line, with the single optional leading space removed
    Data(String),
    /// Blank line
    Empty,
    /// `: comment` line or any line with an unknown field
    Comment(String),
}

/// Classified payload of a single `data:` frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The `[DONE]` sentinel
    Done,
    /// `Error: <message>` sent by the backend
    Error(String),
    /// Incremental text fragment from `{"p": "..."}`
    Fragment(String),
}

/// Something a decoding session reports to its consumer.
///
/// Terminal failures are not events; they arrive as `Err(StreamError)`
/// items on the decoded stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A fragment arrived. `accumulated` is the whole response so far and
    /// replaces whatever the consumer displayed before.
    Content { delta: String, accumulated: String },
    /// The `[DONE]` sentinel arrived. Nothing follows it.
    Completed,
    /// The backend sent an `Error:` frame. The session keeps reading.
    BackendError(String),
    /// A frame could not be parsed. The session keeps reading.
    Malformed { payload: String, reason: String },
}

impl StreamEvent {
    /// Accumulated text for content events
    pub fn accumulated(&self) -> Option<&str> {
        match self {
            StreamEvent::Content { accumulated, .. } => Some(accumulated),
            _ => None,
        }
    }

    /// Text handed to an error callback, if this event is an error
    pub fn error_message(&self) -> Option<String> {
        match self {
            StreamEvent::BackendError(message) => Some(message.clone()),
            StreamEvent::Malformed { reason, .. } => {
                Some(format!("Failed to parse token data: {}", reason))
            }
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StreamEvent::Completed)
    }
}

/// Lifecycle of one decoding session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Streaming,
    Completed,
    Errored,
}

impl SessionState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, SessionState::Streaming)
    }
}

/// Errors from classifying a frame payload
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Payload is not valid JSON, or its `p` field is not a string
    InvalidJson { payload: String, source: String },
    /// Payload is a JSON object without a fragment field
    MissingFragment { payload: String },
}

impl SseParseError {
    /// The offending payload text
    pub fn payload(&self) -> &str {
        match self {
            SseParseError::InvalidJson { payload, .. } => payload,
            SseParseError::MissingFragment { payload } => payload,
        }
    }
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { payload, source } => {
                write!(f, "Invalid JSON payload '{}': {}", payload, source)
            }
            SseParseError::MissingFragment { payload } => {
                write!(f, "Missing fragment field in payload '{}'", payload)
            }
        }
    }
}

impl std::error::Error for SseParseError {}
