//! Streaming completion client.
//!
//! Public surface is intentionally small: build a [`CompletionClient`] from
//! a [`crate::config::CompletionConfig`] and call
//! [`CompletionClient::complete`].

pub mod core;

pub use core::CompletionClient;
