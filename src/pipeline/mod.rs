//! Streaming response pipeline.
//!
//! Raw bytes from the transport flow through the decoder into JSON frames,
//! from which content deltas are extracted:
//!
//! ```text
//! Raw Bytes → SseLineDecoder → JSON frames → content_delta → text deltas
//!     │             │                │
//!   HTTP       line framing,    choices[0]
//!              [DONE] sentinel  .delta.content
//! ```
//!
//! The decoder owns the per-attempt framing state (a rolling byte buffer);
//! it is created fresh for every attempt and dropped when the attempt
//! resolves, so no stream state ever outlives its request.

pub mod decode;
pub mod extract;


use crate::BoxStream;
use bytes::Bytes;
use serde_json::Value;

/// Decoder seam: turns a byte stream into a stream of JSON frames.
///
/// The output stream terminates on the protocol's end-of-stream sentinel or
/// on transport EOF; a transport error is emitted as the final item.
#[async_trait::async_trait]
pub trait Decoder: Send + Sync {
    async fn decode_stream(&self, input: BoxStream<'static, Bytes>)
        -> BoxStream<'static, Value>;
}
