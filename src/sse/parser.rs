//! Line, frame and payload parsing

use crate::sse::events::{Payload, SseLine, SseParseError};
use crate::sse::payloads::FragmentPayload;

const DONE_SENTINEL: &str = "[DONE]";
const ERROR_PREFIX: &str = "Error:";

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return SseLine::Data(rest.to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Extract the data payload of one frame.
///
/// Multiple `data:` lines are joined with `\n`. Returns `None` when the
/// frame has no data line at all (comments, keep-alives, bare `event:`).
pub fn parse_frame(frame: &str) -> Option<String> {
    let mut data: Option<String> = None;

    for line in frame.split('\n') {
        if let SseLine::Data(chunk) = parse_sse_line(line) {
            match data.as_mut() {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&chunk);
                }
                None => data = Some(chunk),
            }
        }
    }

    data
}

/// Classify a frame payload.
///
/// Surrounding whitespace is trimmed first. `[DONE]` and `Error: ...` are
/// matched literally; anything else must be a JSON object with a string
/// fragment field.
pub fn parse_payload(raw: &str) -> Result<Payload, SseParseError> {
    let payload = raw.trim();

    if payload == DONE_SENTINEL {
        return Ok(Payload::Done);
    }

    if let Some(rest) = payload.strip_prefix(ERROR_PREFIX) {
        let message = rest.strip_prefix(' ').unwrap_or(rest);
        return Ok(Payload::Error(message.to_string()));
    }

    let parsed: FragmentPayload =
        serde_json::from_str(payload).map_err(|e| SseParseError::InvalidJson {
            payload: payload.to_string(),
            source: e.to_string(),
        })?;

    parsed
        .p
        .map(Payload::Fragment)
        .ok_or_else(|| SseParseError::MissingFragment {
            payload: payload.to_string(),
        })
}
