//! Completion capability trait

use crate::config::ProviderKind;
use crate::error::LlmError;
use crate::stream::{FragmentStream, FragmentStreamHandle};
use crate::types::CompletionRequest;
use crate::utils::cancel::make_cancellable_stream;
use async_trait::async_trait;

/// One interface for chat completion regardless of backend.
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Incremental completion.
    ///
    /// The returned stream is lazy: the request is sent on first poll and any
    /// failure is delivered as the first `Err` item. It cannot be restarted.
    fn stream(&self, request: CompletionRequest) -> FragmentStream;

    fn stream_with_cancel(&self, request: CompletionRequest) -> FragmentStreamHandle {
        let (stream, cancel) = make_cancellable_stream(self.stream(request));
        FragmentStreamHandle { stream, cancel }
    }

    /// Blocking completion returning the trimmed text of the first choice,
    /// or `""` when the backend returned no content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
