//! Common Streaming Utilities
//!
//! Both backends stream Server-Sent Events. This module turns an HTTP request
//! into a lazy [`FragmentStream`] using eventsource-stream for UTF-8 safe SSE
//! framing; providers only supply an [`SseEventConverter`].

use eventsource_stream::{Event, Eventsource};
use futures_util::StreamExt;

use crate::config::ProviderKind;
use crate::error::{LlmError, classify_http_error};
use crate::stream::{FragmentStream, StreamFragment};

/// What a single provider event means for the fragment sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSignal {
    /// Text to forward to the consumer.
    Delta(String),
    /// The provider reported completion; end the sequence now.
    Stop,
}

/// Converts provider-specific SSE events into [`StreamSignal`]s.
///
/// A single event may produce zero or more signals.
pub trait SseEventConverter: Send + Sync {
    fn convert_event(&self, event: &Event) -> Result<Vec<StreamSignal>, LlmError>;
}

/// Stream factory for provider streams.
pub struct StreamFactory;

impl StreamFactory {
    /// Create a fragment stream from a request builder and a converter.
    ///
    /// Nothing is sent until the stream is first polled. `prepare` runs at that
    /// point too, so configuration errors surface as the first item.
    ///
    /// On success the stream ends with exactly one `done` fragment: either when
    /// the converter signals [`StreamSignal::Stop`] (the transport is dropped
    /// without draining) or when the transport ends. Errors end the stream
    /// without a `done` fragment.
    pub fn create_fragment_stream<F, C>(
        provider: ProviderKind,
        prepare: F,
        converter: C,
    ) -> FragmentStream
    where
        F: FnOnce() -> Result<reqwest::RequestBuilder, LlmError> + Send + 'static,
        C: SseEventConverter + 'static,
    {
        let stream = async_stream::try_stream! {
            let request = prepare()?;
            let response = request
                .send()
                .await
                .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;

            let response = if response.status().is_success() {
                response
            } else {
                let error = classify_error_response(provider, response).await;
                tracing::debug!(target: "quickprompt::http", %provider, err = %error, "stream request rejected");
                Err::<reqwest::Response, LlmError>(error)?
            };

            let mut events = response.bytes_stream().eventsource();
            let mut stopped = false;

            'events: while let Some(event) = events.next().await {
                let event = event
                    .map_err(|e| LlmError::StreamError(format!("SSE parsing error: {e}")))?;
                tracing::trace!(target: "quickprompt::http", %provider, event_name = %event.event, "sse event");

                let data = event.data.trim();
                if data.is_empty() || data == "[DONE]" {
                    continue;
                }

                for signal in converter.convert_event(&event)? {
                    match signal {
                        StreamSignal::Delta(text) => yield StreamFragment::text(text),
                        StreamSignal::Stop => {
                            stopped = true;
                            break 'events;
                        }
                    }
                }
            }

            drop(events);
            tracing::debug!(target: "quickprompt::http", %provider, stopped, "stream finished");
            yield StreamFragment::done();
        };

        Box::pin(stream)
    }
}

/// Read the body of a failed response and classify it.
pub async fn classify_error_response(
    provider: ProviderKind,
    response: reqwest::Response,
) -> LlmError {
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    classify_http_error(provider, status, &body, &headers)
}

/// Turn an event payload that failed to parse into the most useful error.
///
/// Payloads carrying an `error` object become `ApiError`; anything else is a
/// `ParseError` with the raw data attached.
pub fn parse_failure(provider: ProviderKind, data: &str, err: serde_json::Error) -> LlmError {
    tracing::warn!(%provider, "Failed to parse SSE event: {err}");
    tracing::warn!(%provider, "Raw event data: {data}");

    if let Ok(generic) = serde_json::from_str::<serde_json::Value>(data) {
        if let Some(error_obj) = generic.get("error") {
            return event_error(provider, error_obj);
        }
    }

    LlmError::ParseError(format!(
        "Failed to parse {provider} event: {err}. Raw data: {data}"
    ))
}

/// Map an in-stream `error` object onto an `ApiError`.
pub fn event_error(provider: ProviderKind, error_obj: &serde_json::Value) -> LlmError {
    let message = error_obj
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error_obj.as_str())
        .unwrap_or("Unknown error");
    LlmError::ApiError {
        code: 0, // No status code inside an SSE body
        message: format!("{provider} API error: {message}"),
        details: Some(error_obj.clone()),
    }
}

/// Helper for building signal lists.
#[derive(Debug, Default)]
pub struct SignalBuilder {
    signals: Vec<StreamSignal>,
}

impl SignalBuilder {
    pub fn new() -> Self {
        Self {
            signals: Vec::with_capacity(2), // Most conversions produce 1-2 signals
        }
    }

    /// Add a text delta (only if it is not empty)
    pub fn add_delta(mut self, text: String) -> Self {
        if !text.is_empty() {
            self.signals.push(StreamSignal::Delta(text));
        }
        self
    }

    pub fn add_stop(mut self) -> Self {
        self.signals.push(StreamSignal::Stop);
        self
    }

    pub fn build(self) -> Vec<StreamSignal> {
        self.signals
    }
}
