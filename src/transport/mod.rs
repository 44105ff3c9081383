//! Network transport.

pub mod http;

pub use http::HttpTransport;

/// Transport-level failures (connection setup, TLS, mid-stream drops).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}
