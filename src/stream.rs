//! Streaming types
//!
//! A completion stream is a lazy, single-consumer sequence of
//! [`StreamFragment`]s. A successful stream always ends with exactly one
//! `done` fragment; a failed one ends with an `Err` item and no `done`.

use std::pin::Pin;
use std::time::{Duration, Instant};

use futures::Stream;
use futures_util::StreamExt;

use crate::error::LlmError;
use crate::utils::cancel::CancelHandle;

/// One increment of a streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFragment {
    pub text: String,
    pub done: bool,
}

impl StreamFragment {
    /// A text increment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    /// The terminal marker. Carries no text.
    pub fn done() -> Self {
        Self {
            text: String::new(),
            done: true,
        }
    }
}

/// Boxed fragment stream returned by every backend.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<StreamFragment, LlmError>> + Send>>;

/// A fragment stream paired with a handle that can stop it from elsewhere.
pub struct FragmentStreamHandle {
    pub stream: FragmentStream,
    pub cancel: CancelHandle,
}

/// Text gathered from a fully drained stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutcome {
    pub text: String,
    /// Whether the `done` fragment was seen. False only for cancelled streams.
    pub completed: bool,
    pub elapsed: Duration,
}

/// Drain `stream`, calling `on_fragment` for every text increment.
///
/// Stops at the `done` fragment. The first error aborts the drain and is returned.
pub async fn drain_stream<F>(
    mut stream: FragmentStream,
    mut on_fragment: F,
) -> Result<StreamOutcome, LlmError>
where
    F: FnMut(&str),
{
    let started = Instant::now();
    let mut text = String::new();
    let mut completed = false;

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        if !fragment.text.is_empty() {
            on_fragment(&fragment.text);
            text.push_str(&fragment.text);
        }
        if fragment.done {
            completed = true;
            break;
        }
    }

    Ok(StreamOutcome {
        text,
        completed,
        elapsed: started.elapsed(),
    })
}

/// Concatenate every fragment of `stream`.
pub async fn collect_text(stream: FragmentStream) -> Result<String, LlmError> {
    drain_stream(stream, |_| {}).await.map(|outcome| outcome.text)
}
