//! OpenAI-compatible client

use async_trait::async_trait;
use secrecy::ExposeSecret;

use super::streaming::OpenAiCompatibleEventConverter;
use super::transformers::{ChatCompletionResponse, transform_chat};
use crate::config::{ProviderConfig, ProviderKind};
use crate::error::LlmError;
use crate::stream::FragmentStream;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;
use crate::utils::streaming::{StreamFactory, classify_error_response};

/// Client for `/chat/completions` style backends (OpenAI, Ollama).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl OpenAiCompatibleClient {
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionCapability for OpenAiCompatibleClient {
    fn provider(&self) -> ProviderKind {
        self.config.provider
    }

    fn stream(&self, request: CompletionRequest) -> FragmentStream {
        let provider = self.config.provider;
        let config = self.config.clone();
        let http = self.http_client.clone();
        let url = self.chat_url();

        let prepare = move || -> Result<reqwest::RequestBuilder, LlmError> {
            let api_key = config.require_credential()?;
            let body = transform_chat(&request, true);
            tracing::debug!(target: "quickprompt::http", %provider, model = %request.model, %url, "sending stream request");
            Ok(http
                .post(url)
                .bearer_auth(api_key.expose_secret())
                .json(&body))
        };

        StreamFactory::create_fragment_stream(
            provider,
            prepare,
            OpenAiCompatibleEventConverter::new(provider),
        )
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let provider = self.config.provider;
        let api_key = self.config.require_credential()?;
        let url = self.chat_url();
        let body = transform_chat(&request, false);
        tracing::debug!(target: "quickprompt::http", %provider, model = %request.model, %url, "sending completion request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;

        if !response.status().is_success() {
            return Err(classify_error_response(provider, response).await);
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse {provider} response: {e}"))
        })?;
        Ok(parsed.first_text())
    }
}
