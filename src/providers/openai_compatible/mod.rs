//! OpenAI-compatible backend
//!
//! Covers api.openai.com and any server exposing `/chat/completions` with
//! the same SSE format; Ollama is reached through its `/v1` endpoint.

pub mod client;
pub mod streaming;
pub mod transformers;

pub use client::OpenAiCompatibleClient;
pub use streaming::OpenAiCompatibleEventConverter;
