use crate::config::CompletionConfig;
use crate::transport::TransportError;
use crate::types::Message;
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use serde_json::json;
use std::env;
use std::time::Duration;

/// Fixed generation cap for one completion request.
const MAX_TOKENS: u32 = 2048;

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        // Env-overridable timeout; covers the whole streamed response.
        let timeout_secs = env::var("REDRAFT_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.credential(),
        })
    }

    /// Execute one streaming completion request.
    ///
    /// A non-2xx response is surfaced as [`Error::Api`] carrying the server's
    /// structured error message; a 2xx response yields the raw byte stream
    /// for the decoder.
    pub async fn execute_stream(
        &self,
        messages: &[Message],
        request_id: &str,
    ) -> Result<BoxStream<'static, Bytes>> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": MAX_TOKENS,
            "stream": true,
        });

        let mut req = self
            .client
            .post(&url)
            .json(&body)
            .header("accept", "text/event-stream")
            // Correlation id; providers may ignore it, but logs can link on it.
            .header("x-redraft-request-id", request_id);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let byte_stream = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(Box::pin(byte_stream))
    }
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
