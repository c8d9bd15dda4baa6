//! Common test utilities for integration tests.
//!
//! Byte-stream builders, a recording [`StreamCallbacks`] implementation and
//! JSON fixtures shaped like the backend's responses.

#![allow(dead_code)]

use bytes::Bytes;
use futures::stream;
use serde_json::{json, Value};

use qchat::auth::Credentials;
use qchat::sse::{drive_callbacks, decode_stream, ByteStream, SessionState, StreamCallbacks, StreamOptions};

/// One callback invocation, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Data(String),
    Error(String),
    Complete,
}

/// Records every callback invocation
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    pub calls: Vec<Call>,
}

impl RecordingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Data(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Error(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Complete).count()
    }
}

impl StreamCallbacks for RecordingCallbacks {
    fn on_data(&mut self, accumulated: &str) {
        self.calls.push(Call::Data(accumulated.to_string()));
    }

    fn on_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_string()));
    }

    fn on_complete(&mut self) {
        self.calls.push(Call::Complete);
    }
}

/// Body that yields `chunks` one by one and then closes
pub fn body_from_chunks(chunks: Vec<Vec<u8>>) -> ByteStream {
    Box::pin(stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c)))))
}

/// Body that yields `text` as one chunk
pub fn body_from_str(text: &str) -> ByteStream {
    body_from_chunks(vec![text.as_bytes().to_vec()])
}

/// Decode `body` with default options and record the callbacks
pub async fn run_session(body: ByteStream) -> (RecordingCallbacks, SessionState) {
    let mut callbacks = RecordingCallbacks::new();
    let state = drive_callbacks(decode_stream(body, StreamOptions::new()), &mut callbacks).await;
    (callbacks, state)
}

/// `data: {"p": ...}` frame for a fragment
pub fn fragment_frame(fragment: &str) -> String {
    format!("data: {}\n\n", json!({ "p": fragment }))
}

pub const DONE_FRAME: &str = "data: [DONE]\n\n";

pub fn test_credentials() -> Credentials {
    Credentials::from_login("test-access-token", "bearer", "patient@example.com")
}

pub fn conversation_json(id: &str, title: &str, updated_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "user_id": "user-1",
        "created_at": "2024-05-01T09:00:00",
        "updated_at": updated_at,
        "document_id": null
    })
}

pub fn message_json(id: &str, conversation_id: &str, role: &str, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "role": role,
        "created_at": "2024-05-01T09:00:00",
        "updated_at": "2024-05-01T09:00:00",
        "conversation_id": conversation_id,
        "status": "success"
    })
}
