//! Configuration
//!
//! `AppConfig` is loaded once (from the environment or JSON) and handed to
//! [`CompletionClient::from_config`](crate::providers::CompletionClient::from_config).
//! Nothing here is global; every value is immutable after load.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LlmError;
use crate::model::resolve_model;

pub const DEFAULT_GLOBAL_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

/// Ollama ignores the bearer token but the OpenAI wire format requires one.
const OLLAMA_PLACEHOLDER_KEY: &str = "ollama";

/// Supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }

    /// Whether the backend speaks the OpenAI chat-completions protocol.
    pub const fn is_openai_compatible(&self) -> bool {
        matches!(self, Self::OpenAi | Self::Ollama)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            other => Err(LlmError::ConfigurationError(format!(
                "Unknown provider: {other}. Valid options: openai, anthropic, ollama"
            ))),
        }
    }
}

/// HTTP transport settings. No timeout is enforced unless one is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl HttpConfig {
    /// Build a `reqwest::Client` honoring these settings.
    pub fn build_client(&self) -> Result<reqwest::Client, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
    }
}

/// Connection settings for the one selected backend.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub endpoint: String,
    pub credential: Option<SecretString>,
    pub default_model: String,
}

impl ProviderConfig {
    /// The configured credential, or `MissingApiKey` if there is none.
    pub fn require_credential(&self) -> Result<&SecretString, LlmError> {
        match &self.credential {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
            _ => Err(LlmError::MissingApiKey(self.provider.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        validate_url(&self.endpoint)
    }
}

/// Application configuration.
///
/// ```rust
/// use quickprompt::config::{AppConfig, ProviderKind};
///
/// let config = AppConfig::from_json(r#"{"provider":"ollama","ollama_model":"qwen2"}"#).unwrap();
/// assert_eq!(config.provider, ProviderKind::Ollama);
/// assert_eq!(config.resolve_model(Some("global")), "qwen2");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub global_model: String,
    pub openai_api_key: Option<SecretString>,
    pub openai_base_url: String,
    pub anthropic_api_key: Option<SecretString>,
    pub anthropic_base_url: String,
    pub ollama_endpoint: String,
    pub ollama_model: String,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            global_model: DEFAULT_GLOBAL_MODEL.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            ollama_endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, using the same variable names as
    /// [`from_env`](Self::from_env). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_secs = |key: &str| -> Result<Option<u64>, LlmError> {
            get(key)
                .map(|v| {
                    v.trim().parse::<u64>().map_err(|e| {
                        LlmError::ConfigurationError(format!("Invalid {key}: {e}"))
                    })
                })
                .transpose()
        };

        let defaults = Self::default();
        let config = Self {
            provider: get("QUICKPROMPT_PROVIDER")
                .map(|v| v.parse::<ProviderKind>())
                .transpose()?
                .unwrap_or_default(),
            global_model: get("QUICKPROMPT_MODEL").unwrap_or(defaults.global_model),
            openai_api_key: get("OPENAI_API_KEY").map(SecretString::from),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            anthropic_api_key: get("ANTHROPIC_API_KEY").map(SecretString::from),
            anthropic_base_url: get("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            ollama_endpoint: get("OLLAMA_ENDPOINT").unwrap_or(defaults.ollama_endpoint),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            timeout_secs: parse_secs("QUICKPROMPT_TIMEOUT_SECS")?,
            connect_timeout_secs: parse_secs("QUICKPROMPT_CONNECT_TIMEOUT_SECS")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, LlmError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        validate_url(&self.openai_base_url)?;
        validate_url(&self.anthropic_base_url)?;
        validate_url(&self.ollama_endpoint)?;
        if self.global_model.trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "Global model cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Connection settings for the selected provider.
    pub fn provider_config(&self) -> ProviderConfig {
        match self.provider {
            ProviderKind::OpenAi => ProviderConfig {
                provider: ProviderKind::OpenAi,
                endpoint: self.openai_base_url.clone(),
                credential: self.openai_api_key.clone(),
                default_model: self.global_model.clone(),
            },
            ProviderKind::Anthropic => ProviderConfig {
                provider: ProviderKind::Anthropic,
                endpoint: self.anthropic_base_url.clone(),
                credential: self.anthropic_api_key.clone(),
                default_model: self.global_model.clone(),
            },
            ProviderKind::Ollama => ProviderConfig {
                provider: ProviderKind::Ollama,
                endpoint: format!("{}/v1", self.ollama_endpoint.trim_end_matches('/')),
                credential: Some(SecretString::from(OLLAMA_PLACEHOLDER_KEY)),
                default_model: self.ollama_model.clone(),
            },
        }
    }

    /// Resolve a per-command model override against this configuration.
    pub fn resolve_model(&self, model_override: Option<&str>) -> String {
        resolve_model(
            model_override,
            self.provider,
            &self.ollama_model,
            &self.global_model,
        )
    }
}

fn validate_url(url: &str) -> Result<(), LlmError> {
    if url.is_empty() {
        return Err(LlmError::ConfigurationError(
            "Base URL cannot be empty".to_string(),
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(LlmError::ConfigurationError(format!(
            "Base URL must start with http:// or https://: {url}"
        )));
    }
    Ok(())
}
