//! # quickprompt
//!
//! Streaming chat-completion core for quick-action commands: send a prompt
//! (optionally with a system prompt) to OpenAI, Anthropic or a local Ollama
//! server and consume the answer as a sequence of text fragments.
//!
#![deny(unsafe_code)]
//! ## Features
//!
//! - **One interface**: [`CompletionClient`](providers::CompletionClient) hides
//!   which backend is configured.
//! - **Lazy streams**: nothing is sent until the stream is polled; every
//!   failure arrives as an `Err` item.
//! - **Terminal marker**: a successful stream ends with exactly one `done` fragment.
//! - **Usage accounting**: r50k token counts and per-model cost estimates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quickprompt::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LlmError> {
//!     let config = AppConfig::from_env()?;
//!     let client = CompletionClient::from_config(&config)?;
//!     let model = config.resolve_model(None);
//!
//!     let stream = client.create_stream(&model, Some("Be terse."), "2+2?");
//!     let outcome = drain_stream(stream, |fragment| print!("{fragment}")).await?;
//!     println!();
//!
//!     let usage = RunUsage::measure(&model, "Be terse.", "2+2?", &outcome.text);
//!     println!("{} tokens", usage.total_tokens());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod prompts;
pub mod providers;
pub mod stream;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod usage;
pub mod utils;

pub use error::LlmError;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::config::{AppConfig, HttpConfig, ProviderConfig, ProviderKind};
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::model::{GLOBAL_MODEL_SENTINEL, resolve_model};
    pub use crate::prompts::{
        Tone, compose_system_prompt, compose_user_message, refine_search_query,
    };
    pub use crate::providers::CompletionClient;
    pub use crate::stream::{
        FragmentStream, FragmentStreamHandle, StreamFragment, StreamOutcome, collect_text,
        drain_stream,
    };
    pub use crate::traits::CompletionCapability;
    pub use crate::types::CompletionRequest;
    pub use crate::usage::{RunUsage, UsageLedger, count_tokens, estimate_price_cents};
    pub use crate::utils::cancel::CancelHandle;
}
