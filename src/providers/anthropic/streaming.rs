//! Anthropic streaming implementation
//!
//! Only `content_block_delta` events carrying a `text_delta` produce text.
//! The sequence ends when the SSE transport closes (after `message_stop`);
//! an `error` event aborts it.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::config::ProviderKind;
use crate::error::LlmError;
use crate::utils::streaming::{
    SignalBuilder, SseEventConverter, StreamSignal, event_error, parse_failure,
};

/// Anthropic stream event structure
///
/// Flexible enough to accept every event type; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicStreamEvent {
    r#type: String,
    #[serde(default)]
    delta: Option<AnthropicDelta>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Supports text_delta, input_json_delta, thinking_delta, etc.; only text is used.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicDelta {
    #[serde(rename = "type")]
    #[serde(default)]
    delta_type: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic event converter
#[derive(Debug, Clone, Default)]
pub struct AnthropicEventConverter;

impl AnthropicEventConverter {
    pub fn new() -> Self {
        Self
    }

    fn convert_anthropic_event(
        &self,
        event: AnthropicStreamEvent,
    ) -> Result<Vec<StreamSignal>, LlmError> {
        match event.r#type.as_str() {
            "content_block_delta" => {
                let mut builder = SignalBuilder::new();
                if let Some(delta) = event.delta {
                    if delta.delta_type.as_deref() == Some("text_delta") {
                        if let Some(text) = delta.text {
                            builder = builder.add_delta(text);
                        }
                    }
                }
                Ok(builder.build())
            }
            "error" => {
                let error = event.error.unwrap_or(serde_json::Value::Null);
                Err(event_error(ProviderKind::Anthropic, &error))
            }
            // message_start, content_block_start/stop, message_delta, message_stop, ping
            _ => Ok(vec![]),
        }
    }
}

impl SseEventConverter for AnthropicEventConverter {
    fn convert_event(&self, event: &Event) -> Result<Vec<StreamSignal>, LlmError> {
        match serde_json::from_str::<AnthropicStreamEvent>(&event.data) {
            Ok(anthropic_event) => self.convert_anthropic_event(anthropic_event),
            Err(e) => Err(parse_failure(ProviderKind::Anthropic, &event.data, e)),
        }
    }
}
