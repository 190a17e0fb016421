//! Anthropic Client Implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::ANTHROPIC_VERSION;
use super::streaming::AnthropicEventConverter;
use super::transformers::{MessagesResponse, transform_messages};
use crate::config::{ProviderConfig, ProviderKind};
use crate::error::LlmError;
use crate::stream::FragmentStream;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;
use crate::utils::streaming::{StreamFactory, classify_error_response};

/// Anthropic Client
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.endpoint.trim_end_matches('/'))
    }
}

/// Authentication and versioning headers for every Anthropic request.
fn build_headers(api_key: &SecretString) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-api-key",
        HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid API key: {e}")))?,
    );
    headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
    Ok(headers)
}

#[async_trait]
impl CompletionCapability for AnthropicClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn stream(&self, request: CompletionRequest) -> FragmentStream {
        let config = self.config.clone();
        let http = self.http_client.clone();
        let url = self.messages_url();

        let prepare = move || -> Result<reqwest::RequestBuilder, LlmError> {
            let headers = build_headers(config.require_credential()?)?;
            let body = transform_messages(&request, true);
            tracing::debug!(target: "quickprompt::http", provider = "anthropic", model = %request.model, %url, "sending stream request");
            Ok(http.post(url).headers(headers).json(&body))
        };

        StreamFactory::create_fragment_stream(
            ProviderKind::Anthropic,
            prepare,
            AnthropicEventConverter::new(),
        )
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let headers = build_headers(self.config.require_credential()?)?;
        let url = self.messages_url();
        let body = transform_messages(&request, false);
        tracing::debug!(target: "quickprompt::http", provider = "anthropic", model = %request.model, %url, "sending completion request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;

        if !response.status().is_success() {
            return Err(classify_error_response(ProviderKind::Anthropic, response).await);
        }

        let text = response.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse anthropic response: {e}"))
        })?;
        Ok(parsed.first_text())
    }
}
