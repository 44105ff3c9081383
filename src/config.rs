//! Completion request configuration.
//!
//! One [`CompletionConfig`] covers a single operation and is immutable for
//! its duration. Fields carry serde defaults so hosts can deserialize the
//! struct straight from a settings file, omitting anything they don't set.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Hosted default endpoint. Requests here require a credential.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended by the transport.
    pub endpoint: String,

    /// Bearer credential. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub model: String,

    /// Emitted first, role `system`, when non-empty.
    pub system_prompt: String,

    /// Leading user instruction; `Continue` falls back to a fixed literal
    /// when empty.
    pub user_prompt: String,

    /// Trailing assistant message for `Rewrite`, when non-empty.
    pub assistant_prompt: String,

    /// Characters of document text gathered before the selection.
    pub context_before_chars: usize,

    /// Characters of document text gathered after the selection.
    pub context_after_chars: usize,

    /// Echo the selected fragment into the context block for `Rewrite`.
    pub include_selection_in_context: bool,

    /// Upper bound on sequential completion attempts.
    pub max_attempts: u32,

    /// Pause between attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: String::new(),
            user_prompt: String::new(),
            assistant_prompt: String::new(),
            context_before_chars: 500,
            context_after_chars: 200,
            include_selection_in_context: false,
            max_attempts: 10,
            retry_delay_ms: 1000,
        }
    }
}

impl CompletionConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Resolve the credential: explicit config first, then the environment.
    pub fn credential(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    /// Caller-level precondition check, run before any network call.
    ///
    /// The hosted default endpoint rejects unauthenticated requests, so a
    /// missing credential there is a configuration error rather than ten
    /// doomed attempts.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            Error::Configuration(format!("invalid endpoint URL {:?}: {}", self.endpoint, e))
        })?;

        if url.host_str() == Some("api.openai.com") && self.credential().is_none() {
            return Err(Error::Configuration(
                "an API key is required for the hosted default endpoint".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CompletionConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.context_before_chars, 500);
        assert_eq!(config.context_after_chars, 200);
        assert!(!config.include_selection_in_context);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.retry_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: CompletionConfig = serde_json::from_str(
            r#"{"model": "gpt-4o-mini", "system_prompt": "Be terse.", "max_attempts": 3}"#,
        )
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.system_prompt, "Be terse.");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn hosted_endpoint_requires_credential() {
        std::env::remove_var("OPENAI_API_KEY");
        let config = CompletionConfig::default();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));

        let with_key = CompletionConfig {
            api_key: Some("sk-test".to_string()),
            ..CompletionConfig::default()
        };
        assert!(with_key.validate().is_ok());
    }

    #[test]
    fn self_hosted_endpoint_allows_missing_credential() {
        std::env::remove_var("OPENAI_API_KEY");
        let config = CompletionConfig {
            endpoint: "http://localhost:8080/v1".to_string(),
            ..CompletionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let config = CompletionConfig {
            endpoint: "not a url".to_string(),
            ..CompletionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));
    }
}
