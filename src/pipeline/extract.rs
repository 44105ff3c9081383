//! Delta extraction from decoded stream frames.

use serde_json::Value;

/// Pull the incremental content fragment out of a chat-completion stream
/// frame (`choices[0].delta.content`). Frames without one yield `None` and
/// are ignored by the caller.
pub fn content_delta(frame: &Value) -> Option<&str> {
    frame
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
}
