//! Turns a chunked response body into a stream of [`StreamEvent`]s.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::StreamError;
use crate::sse::cancel::CancelToken;
use crate::sse::decoder::Utf8StreamDecoder;
use crate::sse::events::StreamEvent;
use crate::sse::frames::FrameBuffer;
use crate::sse::session::StreamSession;
use crate::traits::HttpError;

/// Raw response body as delivered by an [`crate::traits::HttpClient`]
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Decoded events. Ends after `Completed` or after the first `Err`.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, StreamError>> + Send>>;

/// Per-stream knobs
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    /// Fail with `StreamError::Timeout` when no chunk arrives for this long
    pub idle_timeout: Option<Duration>,
    pub cancel: CancelToken,
}

impl StreamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero duration disables the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = if timeout.is_zero() { None } else { Some(timeout) };
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

enum Chunk {
    Data(Bytes),
    Eof,
    Failed(StreamError),
}

struct DecoderState {
    bytes: ByteStream,
    decoder: Utf8StreamDecoder,
    frames: FrameBuffer,
    session: StreamSession,
    idle_timeout: Option<Duration>,
    cancel: CancelToken,
    eof: bool,
    finished: bool,
}

/// Decode a response body into stream events.
///
/// Bytes are decoded as UTF-8 across chunk boundaries, split into frames
/// on blank lines and classified. Terminal failures (transport errors,
/// cancellation, idle timeout, close before `[DONE]`) are yielded once as
/// `Err` and end the stream. A close that follows a backend `Error:` frame
/// ends the stream without another item.
pub fn decode_stream(bytes: ByteStream, options: StreamOptions) -> EventStream {
    debug!(
        "Stream session started (idle timeout: {:?})",
        options.idle_timeout
    );

    let state = DecoderState {
        bytes,
        decoder: Utf8StreamDecoder::new(),
        frames: FrameBuffer::new(),
        session: StreamSession::new(),
        idle_timeout: options.idle_timeout,
        cancel: options.cancel,
        eof: false,
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        let item = state.next_item().await?;
        Some((item, state))
    }))
}

impl DecoderState {
    async fn next_item(&mut self) -> Option<Result<StreamEvent, StreamError>> {
        loop {
            if self.finished {
                return None;
            }

            if self.cancel.is_cancelled() {
                return Some(Err(self.terminate(StreamError::Cancelled)));
            }

            // Frames already buffered come first
            while let Some(frame) = self.frames.next_frame() {
                if let Some(event) = self.session.apply_frame(&frame) {
                    return Some(Ok(self.emit(event)));
                }
            }

            if self.eof {
                if let Some(frame) = self.frames.finish() {
                    if let Some(event) = self.session.apply_frame(&frame) {
                        return Some(Ok(self.emit(event)));
                    }
                }
                return self.close_without_sentinel();
            }

            match self.read_chunk().await {
                Chunk::Data(chunk) => {
                    let text = self.decoder.decode(&chunk);
                    self.frames.push(&text);
                }
                Chunk::Eof => {
                    let rest = self.decoder.finish();
                    self.frames.push(&rest);
                    self.eof = true;
                }
                Chunk::Failed(err) => return Some(Err(self.terminate(err))),
            }
        }
    }

    async fn read_chunk(&mut self) -> Chunk {
        let DecoderState {
            bytes,
            cancel,
            idle_timeout,
            ..
        } = self;
        let idle_timeout = *idle_timeout;

        let next = async move {
            match idle_timeout {
                Some(window) => tokio::time::timeout(window, bytes.next())
                    .await
                    .map_err(|_| window),
                None => Ok(bytes.next().await),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Chunk::Failed(StreamError::Cancelled),
            result = next => match result {
                Ok(Some(Ok(chunk))) => Chunk::Data(chunk),
                Ok(Some(Err(e))) => Chunk::Failed(StreamError::Transport {
                    message: e.to_string(),
                }),
                Ok(None) => Chunk::Eof,
                Err(window) => Chunk::Failed(StreamError::Timeout { idle: window }),
            },
        }
    }

    fn emit(&mut self, event: StreamEvent) -> StreamEvent {
        if self.session.is_finished() {
            self.finished = true;
        }
        event
    }

    fn close_without_sentinel(&mut self) -> Option<Result<StreamEvent, StreamError>> {
        if self.session.saw_backend_error() {
            debug!("Stream closed after backend error");
            self.finished = true;
            self.session.fail();
            return None;
        }
        Some(Err(self.terminate(StreamError::UnexpectedEof)))
    }

    fn terminate(&mut self, err: StreamError) -> StreamError {
        warn!(
            "Stream terminated [{}] after {} frames: {}",
            err.error_code(),
            self.session.frames_seen(),
            err
        );
        self.finished = true;
        self.session.fail();
        err
    }
}
