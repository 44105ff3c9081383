use crate::config::CompletionConfig;
use crate::pipeline::decode::SseLineDecoder;
use crate::pipeline::{extract, Decoder};
use crate::progress::ProgressSink;
use crate::transport::HttpTransport;
use crate::types::Message;
use crate::{Error, Result};
use futures::StreamExt;
use std::time::Duration;

/// Streaming completion client with retry-on-empty semantics.
///
/// Attempts are strictly sequential: each one is a fresh HTTP request with
/// fresh stream state, fully resolved before the next begins. An attempt
/// succeeds iff its accumulated text is non-blank after trimming; transport
/// drops, non-2xx responses, and empty streams all count as failed attempts
/// and are absorbed until the attempt budget runs out.
pub struct CompletionClient {
    transport: HttpTransport,
    max_attempts: u32,
    retry_delay: Duration,
}

impl CompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            max_attempts: config.max_attempts.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    /// Run up to `max_attempts` attempts and return the first non-blank
    /// accumulated text, trimmed.
    ///
    /// `progress` receives the accumulator-so-far after every delta and is
    /// cleared whenever an attempt resolves. Only exhaustion is terminal:
    /// [`Error::NoContent`] after `max_attempts` attempts without content.
    pub async fn complete(
        &self,
        messages: &[Message],
        progress: &mut dyn ProgressSink,
    ) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            match self.attempt(messages, progress).await {
                Ok(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        return Ok(trimmed.to_string());
                    }
                    tracing::warn!(attempt, "attempt produced no content, retrying");
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "attempt failed, retrying");
                }
            }

            if attempt < self.max_attempts {
                tracing::debug!(
                    delay_ms = self.retry_delay.as_millis() as u64,
                    "pausing before next attempt"
                );
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(Error::NoContent {
            attempts: self.max_attempts,
        })
    }

    /// One full request/stream cycle.
    ///
    /// The progress slot is cleared on every exit path. A transport error
    /// mid-stream fails the attempt; stream end without the sentinel is a
    /// normal completion and keeps whatever was accumulated.
    async fn attempt(
        &self,
        messages: &[Message],
        progress: &mut dyn ProgressSink,
    ) -> Result<String> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let byte_stream = self.transport.execute_stream(messages, &request_id).await?;
        let mut frames = SseLineDecoder.decode_stream(byte_stream).await;

        let mut accumulated = String::new();
        let mut outcome = Ok(());

        while let Some(frame) = frames.next().await {
            match frame {
                Ok(value) => {
                    if let Some(delta) = extract::content_delta(&value) {
                        if !delta.is_empty() {
                            accumulated.push_str(delta);
                            progress.update(&accumulated);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(%request_id, error = %e, "stream interrupted");
                    outcome = Err(e);
                    break;
                }
            }
        }

        progress.clear();
        outcome?;
        Ok(accumulated)
    }
}
