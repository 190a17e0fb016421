//! Anthropic backend (`/v1/messages`)

pub mod client;
pub mod streaming;
pub mod transformers;

pub use client::AnthropicClient;
pub use streaming::AnthropicEventConverter;

/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
