//! # redraft
//!
//! Streaming rewrite/continue engine for chat-completion endpoints.
//!
//! The crate turns a selection (or cursor position) in a text document into
//! a chat-completion request, streams the response back as incremental text
//! deltas, and applies the final result to the document. An unreliable
//! upstream is part of the design: a stream that yields no usable content is
//! retried up to a bounded number of attempts before the operation fails.
//!
//! ## Overview
//!
//! Control flow is linear: the [`facade`] derives an [`EditContext`] from a
//! [`Document`], the [`prompt`] module builds the role-tagged message
//! sequence, and the [`CompletionClient`] drives the network call, feeding
//! partial text to a caller-owned [`ProgressSink`] as it arrives.
//!
//! ## Key Features
//!
//! - **Rewrite & Continue**: replace a selected fragment, or extend the text
//!   at the cursor, with surrounding context framed for the model
//! - **Streaming-First**: incremental SSE decoding with live progress
//! - **Retry-on-Empty**: empty or whitespace-only results are treated as
//!   failed attempts, not hard errors
//! - **Host-Agnostic**: documents and progress displays are ports (traits);
//!   the crate ships an in-memory [`StringDocument`] reference implementation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redraft::{run_action, Action, CompletionConfig, NoopProgress, StringDocument};
//!
//! #[tokio::main]
//! async fn main() -> redraft::Result<()> {
//!     let config = CompletionConfig {
//!         api_key: Some("your-api-key".into()),
//!         ..CompletionConfig::default()
//!     };
//!
//!     let mut doc = StringDocument::with_selection("The quick brown fox.", 4..9);
//!     let mut progress = NoopProgress;
//!     let rewritten = run_action(Action::Rewrite, &mut doc, &config, &mut progress).await?;
//!     println!("{rewritten}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Completion request configuration |
//! | [`prompt`] | Message-sequence assembly from config and edit context |
//! | [`client`] | Streaming completion client with retry loop |
//! | [`pipeline`] | SSE stream decoding and delta extraction |
//! | [`transport`] | HTTP transport over reqwest |
//! | [`document`] | Document port and context extraction |
//! | [`progress`] | Live progress reporting port |
//! | [`facade`] | End-to-end rewrite/continue operations |
//! | [`types`] | Core type definitions (messages, edit context) |

pub mod client;
pub mod config;
pub mod document;
pub mod facade;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::CompletionClient;
pub use config::CompletionConfig;
pub use document::{Document, StringDocument};
pub use facade::run_action;
pub use progress::{MemoryProgress, NoopProgress, ProgressSink};
pub use types::{
    context::{Action, EditContext},
    message::{Message, MessageRole},
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the crate
pub mod error;
pub use error::Error;
