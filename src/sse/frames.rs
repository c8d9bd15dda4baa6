//! Splits decoded text into blank-line delimited frames.

/// Buffers decoded text until a full frame is available.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: String,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text
    pub fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// True when no text is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the next complete frame, skipping empty ones.
    ///
    /// Returns `None` when the buffer holds no full delimiter yet.
    pub fn next_frame(&mut self) -> Option<String> {
        while let Some((start, len)) = find_delimiter(&self.buffer) {
            let frame: String = self.buffer[..start].to_string();
            self.buffer.drain(..start + len);
            if !frame.trim().is_empty() {
                return Some(frame);
            }
        }
        None
    }

    /// Take whatever remains as a final frame at end of stream
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Earliest frame delimiter as `(index, length)`
fn find_delimiter(buffer: &str) -> Option<(usize, usize)> {
    let lf = buffer.find("\n\n").map(|i| (i, 2));
    let crlf = buffer.find("\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
        (a, b) => a.or(b),
    }
}
