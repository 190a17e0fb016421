use thiserror::Error;

/// Library error type.
///
/// Nothing in this crate swallows these; callers decide how to surface them.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No credential configured for the selected provider
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Connection-level failure (refused, reset, TLS, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceededError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any other non-success answer from the backend
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Backend payload could not be understood
    #[error("Parse error: {0}")]
    ParseError(String),

    /// SSE framing failure while reading a stream
    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Telemetry initialization error: {0}")]
    TelemetryInit(String),
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised before any network call; never retried.
    Configuration,
    /// Network, auth, rate-limit or payload failure from the backend.
    Transport,
    /// Local setup failure unrelated to a request.
    Local,
}

impl LlmError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build an `ApiError` carrying the raw backend payload.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) | Self::MissingApiKey(_) => ErrorCategory::Configuration,
            Self::TelemetryInit(_) => ErrorCategory::Local,
            _ => ErrorCategory::Transport,
        }
    }

    pub const fn is_configuration_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Configuration)
    }

    /// HTTP status associated with the error, when the backend supplied one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } if *code != 0 => Some(*code),
            Self::AuthenticationError(_) => Some(401),
            Self::RateLimitError(_) => Some(429),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}
