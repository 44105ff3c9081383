use thiserror::Error;

/// Unified error type for the redraft engine.
///
/// Per-attempt failures (`Transport`, `Api`) are absorbed by the retry loop
/// in [`crate::client::CompletionClient`]; callers normally observe only
/// `Configuration`, `Validation`, or `NoContent`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no usable content after {attempts} attempts")]
    NoContent { attempts: u32 },
}

impl Error {
    /// True when the retry loop may absorb this error and move on to the
    /// next attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Api { .. })
    }
}
