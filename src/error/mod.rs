//! Error Handling Module
//!
//! - Core error type (`LlmError`) and its coarse `ErrorCategory`
//! - HTTP failure classification for OpenAI-style and Anthropic-style envelopes
//! - Conversions from common error types
//!
//! # Example
//!
//! ```rust
//! use quickprompt::error::{ErrorCategory, LlmError};
//!
//! let error = LlmError::MissingApiKey("anthropic".to_string());
//! assert_eq!(error.category(), ErrorCategory::Configuration);
//! ```

mod classify;
mod conversions;
pub mod types;

pub use classify::{
    classify_anthropic_http_error, classify_http_error, classify_openai_compatible_http_error,
};
pub use types::*;
