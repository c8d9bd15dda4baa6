//! Per-call decoding session: accumulated content and lifecycle state.

use tracing::{debug, warn};

use crate::sse::events::{Payload, SessionState, StreamEvent};
use crate::sse::parser::{parse_frame, parse_payload};

/// Owns the accumulated response text for one stream.
///
/// The accumulator only grows. Once the session leaves `Streaming`,
/// every further input is ignored.
#[derive(Debug, Default)]
pub struct StreamSession {
    accumulated: String,
    state: SessionState,
    saw_backend_error: bool,
    frames_seen: usize,
}

impl StreamSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether an `Error:` frame has been received
    pub fn saw_backend_error(&self) -> bool {
        self.saw_backend_error
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    /// Apply a raw frame (text between blank lines).
    ///
    /// Frames without a `data` line produce nothing.
    pub fn apply_frame(&mut self, frame: &str) -> Option<StreamEvent> {
        if self.is_finished() {
            return None;
        }
        let data = parse_frame(frame)?;
        self.frames_seen += 1;

        match parse_payload(&data) {
            Ok(payload) => self.apply(payload),
            Err(e) => {
                warn!("Malformed stream frame: {}", e);
                Some(StreamEvent::Malformed {
                    payload: e.payload().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Apply an already classified payload
    pub fn apply(&mut self, payload: Payload) -> Option<StreamEvent> {
        if self.is_finished() {
            return None;
        }

        match payload {
            Payload::Done => {
                debug!(
                    "Stream completed after {} frames, {} bytes",
                    self.frames_seen,
                    self.accumulated.len()
                );
                self.state = SessionState::Completed;
                Some(StreamEvent::Completed)
            }
            Payload::Error(message) => {
                warn!("Backend reported stream error: {}", message);
                self.saw_backend_error = true;
                Some(StreamEvent::BackendError(message))
            }
            Payload::Fragment(delta) => {
                self.accumulated.push_str(&delta);
                Some(StreamEvent::Content {
                    delta,
                    accumulated: self.accumulated.clone(),
                })
            }
        }
    }

    /// Move to `Errored` after a terminal failure
    pub fn fail(&mut self) {
        if !self.is_finished() {
            self.state = SessionState::Errored;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_fragments() {
        let mut session = StreamSession::new();
        let first = session.apply_frame(r#"data: {"p":"Hello"}"#);
        assert_eq!(first.as_ref().and_then(|e| e.accumulated()), Some("Hello"));
        let second = session.apply_frame(r#"data: {"p":" world"}"#);
        assert_eq!(
            second,
            Some(StreamEvent::Content {
                delta: " world".to_string(),
                accumulated: "Hello world".to_string(),
            })
        );
        assert_eq!(session.accumulated(), "Hello world");
        assert_eq!(session.frames_seen(), 2);
    }

    #[test]
    fn test_done_completes_and_blocks_further_events() {
        let mut session = StreamSession::new();
        assert_eq!(
            session.apply_frame("data: [DONE]"),
            Some(StreamEvent::Completed)
        );
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.apply_frame(r#"data: {"p":"late"}"#), None);
        assert_eq!(session.accumulated(), "");
    }

    #[test]
    fn test_backend_error_does_not_change_state() {
        let mut session = StreamSession::new();
        assert_eq!(
            session.apply_frame("data: Error: rate limited"),
            Some(StreamEvent::BackendError("rate limited".to_string()))
        );
        assert_eq!(session.state(), SessionState::Streaming);
        assert!(session.saw_backend_error());
    }

    #[test]
    fn test_malformed_frame_continues() {
        let mut session = StreamSession::new();
        let event = session.apply_frame("data: not-json");
        match event {
            Some(StreamEvent::Malformed { payload, reason }) => {
                assert_eq!(payload, "not-json");
                assert!(reason.contains("not-json"));
            }
            other => panic!("expected malformed event, got {:?}", other),
        }
        assert_eq!(
            session.apply_frame(r#"data: {"p":"ok"}"#).as_ref().and_then(|e| e.accumulated()),
            Some("ok")
        );
    }

    #[test]
    fn test_comment_frame_ignored() {
        let mut session = StreamSession::new();
        assert_eq!(session.apply_frame(": keep-alive"), None);
        assert_eq!(session.frames_seen(), 0);
    }

    #[test]
    fn test_fail_is_sticky() {
        let mut session = StreamSession::new();
        session.fail();
        assert_eq!(session.state(), SessionState::Errored);
        assert_eq!(session.apply(Payload::Done), None);
        assert_eq!(session.state(), SessionState::Errored);
    }
}
