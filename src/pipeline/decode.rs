//! Streaming SSE decoder (Bytes -> JSON frames).
//!
//! Frames arrive as newline-terminated `data: <json>` lines; a
//! `data: [DONE]` line closes the stream. Splitting happens on the raw byte
//! buffer, so a multi-byte UTF-8 sequence spanning a chunk boundary is never
//! decoded until its line is complete. Accumulated output is therefore
//! invariant under re-chunking of the same byte stream.

use crate::pipeline::Decoder;
use crate::BoxStream;
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde_json::Value;

/// Literal prefix of a payload-bearing line.
const DATA_PREFIX: &str = "data: ";

/// End-of-stream sentinel payload.
const DONE_SENTINEL: &str = "[DONE]";

enum Line {
    Frame(Value),
    Done,
    Skip,
}

/// Classify one complete line.
///
/// Anything without the `data: ` prefix (blank lines, comments, other
/// protocol framing) is discarded, as is any payload that fails to parse as
/// JSON; a malformed frame must not abort the stream.
fn parse_line(raw: &[u8]) -> Line {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();

    let Some(payload) = trimmed.strip_prefix(DATA_PREFIX) else {
        return Line::Skip;
    };

    if payload == DONE_SENTINEL {
        return Line::Done;
    }

    match serde_json::from_str(payload) {
        Ok(value) => Line::Frame(value),
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed stream frame");
            Line::Skip
        }
    }
}

/// Line-oriented SSE decoder with the fixed `data: ` / `[DONE]` framing of
/// the chat-completion streaming convention.
pub struct SseLineDecoder;

#[async_trait::async_trait]
impl Decoder for SseLineDecoder {
    async fn decode_stream(
        &self,
        input: BoxStream<'static, Bytes>,
    ) -> BoxStream<'static, Value> {
        // Incrementally buffer bytes and emit one JSON frame per complete
        // `data:` line. `closed` guards against emitting anything after the
        // terminal item; the sentinel and a transport error are both final.
        let stream = stream::unfold(
            (input, Vec::new(), false),
            |(mut input, mut buf, closed)| async move {
                if closed {
                    return None;
                }

                loop {
                    if let Some(idx) = buf.iter().position(|&b| b == b'\n') {
                        let line: Vec<u8> = buf.drain(..=idx).collect();
                        match parse_line(&line[..line.len() - 1]) {
                            Line::Frame(v) => return Some((Ok(v), (input, buf, false))),
                            Line::Done => return None,
                            Line::Skip => continue,
                        }
                    }

                    match input.next().await {
                        Some(Ok(bytes)) => {
                            buf.extend_from_slice(&bytes);
                        }
                        Some(Err(e)) => {
                            return Some((Err(e), (input, buf, true)));
                        }
                        None => {
                            // EOF without the sentinel: give the unterminated
                            // remainder one final parse, then end normally.
                            let rest = std::mem::take(&mut buf);
                            return match parse_line(&rest) {
                                Line::Frame(v) => Some((Ok(v), (input, buf, true))),
                                _ => None,
                            };
                        }
                    }
                }
            },
        );

        Box::pin(stream)
    }
}
