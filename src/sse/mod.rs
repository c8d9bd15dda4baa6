//! Stream frame decoder for chat responses.
//!
//! The backend answers a chat turn with a chunked body of blank-line
//! separated frames, each carrying a `data:` payload:
//! - `data: {"p": "<fragment>"}` - next piece of the response
//! - `data: Error: <message>` - backend failure, stream continues
//! - `data: [DONE]` - response finished
//!
//! # Module structure
//! - `decoder` - incremental UTF-8 decoding across chunk boundaries
//! - `frames` - splitting decoded text into frames
//! - `parser` - line grammar and payload classification
//! - `session` - accumulated content and lifecycle state
//! - `stream` - `decode_stream`, the async read loop
//! - `cancel` - cancellation handle/token
//! - `callbacks` - `on_data`/`on_error`/`on_complete` adapter

mod callbacks;
mod cancel;
mod decoder;
mod events;
mod frames;
mod parser;
mod payloads;
mod session;
mod stream;

// Re-export public types
pub use callbacks::{drive_callbacks, CallbackFns, StreamCallbacks};
pub use cancel::{CancelHandle, CancelToken};
pub use decoder::Utf8StreamDecoder;
pub use events::{Payload, SessionState, SseLine, SseParseError, StreamEvent};
pub use frames::FrameBuffer;
pub use parser::{parse_frame, parse_payload, parse_sse_line};
pub use session::StreamSession;
pub use stream::{decode_stream, ByteStream, EventStream, StreamOptions};
