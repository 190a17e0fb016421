//! OpenAI Compatible Streaming Implementation
//!
//! Chunks look like `{"choices":[{"delta":{"content":"..."},"finish_reason":null}]}`.
//! Only the first choice is read. A `"stop"` finish reason ends the fragment
//! sequence right away, without waiting for `[DONE]` or the transport to close.

use eventsource_stream::Event;
use serde::Deserialize;

use crate::config::ProviderKind;
use crate::error::LlmError;
use crate::utils::streaming::{
    SignalBuilder, SseEventConverter, StreamSignal, event_error, parse_failure,
};

/// OpenAI-compatible stream event structure
#[derive(Debug, Deserialize)]
pub struct OpenAiCompatibleStreamEvent {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    /// Some servers report failures inside the stream
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Option<StreamDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Event converter for OpenAI-compatible providers
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleEventConverter {
    provider: ProviderKind,
}

impl OpenAiCompatibleEventConverter {
    pub fn new(provider: ProviderKind) -> Self {
        Self { provider }
    }

    fn convert_compat_event(
        &self,
        event: OpenAiCompatibleStreamEvent,
    ) -> Result<Vec<StreamSignal>, LlmError> {
        if let Some(error) = &event.error {
            return Err(event_error(self.provider, error));
        }

        let Some(choice) = event.choices.into_iter().next() else {
            return Ok(vec![]);
        };

        let mut builder = SignalBuilder::new();
        if let Some(content) = choice.delta.and_then(|delta| delta.content) {
            builder = builder.add_delta(content);
        }
        if choice.finish_reason.as_deref() == Some("stop") {
            builder = builder.add_stop();
        }
        Ok(builder.build())
    }
}

impl SseEventConverter for OpenAiCompatibleEventConverter {
    fn convert_event(&self, event: &Event) -> Result<Vec<StreamSignal>, LlmError> {
        match serde_json::from_str::<OpenAiCompatibleStreamEvent>(&event.data) {
            Ok(compat_event) => self.convert_compat_event(compat_event),
            Err(e) => Err(parse_failure(self.provider, &event.data, e)),
        }
    }
}
