//! Callback adapter over a decoded event stream.

use futures_util::stream::{Stream, StreamExt};

use crate::error::StreamError;
use crate::sse::events::{SessionState, StreamEvent};

/// Receiver for a stream driven by [`drive_callbacks`].
pub trait StreamCallbacks {
    /// Full accumulated response so far; replaces previous content
    fn on_data(&mut self, accumulated: &str);
    /// Backend, parse or transport error as display text
    fn on_error(&mut self, message: &str);
    /// `[DONE]` received
    fn on_complete(&mut self);
}

/// Closure-based [`StreamCallbacks`]
pub struct CallbackFns<D, E, C> {
    pub on_data: D,
    pub on_error: E,
    pub on_complete: C,
}

impl<D, E, C> StreamCallbacks for CallbackFns<D, E, C>
where
    D: FnMut(&str),
    E: FnMut(&str),
    C: FnMut(),
{
    fn on_data(&mut self, accumulated: &str) {
        (self.on_data)(accumulated)
    }

    fn on_error(&mut self, message: &str) {
        (self.on_error)(message)
    }

    fn on_complete(&mut self) {
        (self.on_complete)()
    }
}

/// Feed every event of `stream` into `callbacks` and return the final state.
///
/// A stream that ends without `[DONE]` ends in `Errored`.
pub async fn drive_callbacks<S, C>(mut stream: S, callbacks: &mut C) -> SessionState
where
    S: Stream<Item = Result<StreamEvent, StreamError>> + Unpin,
    C: StreamCallbacks + ?Sized,
{
    while let Some(item) = stream.next().await {
        match item {
            Ok(StreamEvent::Content { accumulated, .. }) => callbacks.on_data(&accumulated),
            Ok(StreamEvent::Completed) => {
                callbacks.on_complete();
                return SessionState::Completed;
            }
            Ok(event) => {
                if let Some(message) = event.error_message() {
                    callbacks.on_error(&message);
                }
            }
            Err(err) => {
                callbacks.on_error(&err.to_string());
                return SessionState::Errored;
            }
        }
    }
    SessionState::Errored
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[tokio::test]
    async fn test_closure_callbacks() {
        let mut data = Vec::new();
        let mut errors = Vec::new();
        let mut completed = 0;

        let events = vec![
            Ok(StreamEvent::Content {
                delta: "x".to_string(),
                accumulated: "x".to_string(),
            }),
            Ok(StreamEvent::BackendError("oops".to_string())),
            Ok(StreamEvent::Completed),
        ];

        let state = {
            let mut callbacks = CallbackFns {
                on_data: |s: &str| data.push(s.to_string()),
                on_error: |s: &str| errors.push(s.to_string()),
                on_complete: || completed += 1,
            };
            drive_callbacks(stream::iter(events), &mut callbacks).await
        };

        assert_eq!(state, SessionState::Completed);
        assert_eq!(data, vec!["x".to_string()]);
        assert_eq!(errors, vec!["oops".to_string()]);
        assert_eq!(completed, 1);
    }

    #[tokio::test]
    async fn test_terminal_error_reported_as_text() {
        let mut errors = Vec::new();
        let events: Vec<Result<StreamEvent, StreamError>> = vec![Err(StreamError::UnexpectedEof)];
        let state = {
            let mut callbacks = CallbackFns {
                on_data: |_: &str| {},
                on_error: |s: &str| errors.push(s.to_string()),
                on_complete: || {},
            };
            drive_callbacks(stream::iter(events), &mut callbacks).await
        };
        assert_eq!(state, SessionState::Errored);
        assert_eq!(errors, vec!["stream ended before completion".to_string()]);
    }
}
