//! Provider implementations
//!
//! The set of backends is closed: an OpenAI-compatible client (OpenAI and
//! Ollama) and an Anthropic client. [`CompletionClient`] picks one at
//! configuration time and forwards every call to it.

pub mod anthropic;
pub mod openai_compatible;

use async_trait::async_trait;

use crate::config::{AppConfig, HttpConfig, ProviderConfig, ProviderKind};
use crate::error::LlmError;
use crate::stream::FragmentStream;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;

pub use anthropic::AnthropicClient;
pub use openai_compatible::OpenAiCompatibleClient;

/// The backend selected for this process.
#[derive(Debug, Clone)]
pub enum CompletionClient {
    OpenAiCompatible(OpenAiCompatibleClient),
    Anthropic(AnthropicClient),
}

impl CompletionClient {
    /// Build the client for the provider selected in `config`.
    ///
    /// A missing credential is not an error here; it surfaces on the first
    /// request, before any network I/O.
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        config.validate()?;
        Self::new(config.provider_config(), &config.http_config())
    }

    pub fn new(provider: ProviderConfig, http: &HttpConfig) -> Result<Self, LlmError> {
        Self::with_http_client(provider, http.build_client()?)
    }

    /// Use a caller-supplied `reqwest::Client`.
    pub fn with_http_client(
        provider: ProviderConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, LlmError> {
        provider.validate()?;
        tracing::debug!(provider = %provider.provider, endpoint = %provider.endpoint, "completion client ready");
        Ok(match provider.provider {
            ProviderKind::Anthropic => Self::Anthropic(AnthropicClient::new(provider, http_client)),
            ProviderKind::OpenAi | ProviderKind::Ollama => {
                Self::OpenAiCompatible(OpenAiCompatibleClient::new(provider, http_client))
            }
        })
    }

    fn inner(&self) -> &dyn CompletionCapability {
        match self {
            Self::OpenAiCompatible(client) => client,
            Self::Anthropic(client) => client,
        }
    }

    /// Stream a completion for `user_message` under an optional system prompt.
    ///
    /// ```rust,no_run
    /// use futures_util::StreamExt;
    /// use quickprompt::prelude::*;
    ///
    /// # async fn example() -> Result<(), LlmError> {
    /// let config = AppConfig::from_env()?;
    /// let client = CompletionClient::from_config(&config)?;
    /// let model = config.resolve_model(Some("global"));
    /// let mut stream = client.create_stream(&model, Some("Be terse."), "2+2?");
    /// while let Some(fragment) = stream.next().await {
    ///     let fragment = fragment?;
    ///     print!("{}", fragment.text);
    ///     if fragment.done {
    ///         break;
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_stream(
        &self,
        model: &str,
        system_prompt: Option<&str>,
        user_message: &str,
    ) -> FragmentStream {
        let mut request = CompletionRequest::new(model, user_message);
        if let Some(system) = system_prompt {
            request = request.with_system_prompt(system);
        }
        self.stream(request)
    }

    /// One-shot completion of `user_message`; returns trimmed text or `""`.
    pub async fn create_completion(
        &self,
        model: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        self.complete(CompletionRequest::new(model, user_message))
            .await
    }
}

#[async_trait]
impl CompletionCapability for CompletionClient {
    fn provider(&self) -> ProviderKind {
        self.inner().provider()
    }

    fn stream(&self, request: CompletionRequest) -> FragmentStream {
        self.inner().stream(request)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.inner().complete(request).await
    }
}
