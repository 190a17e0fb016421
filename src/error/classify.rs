//! HTTP error classification
//!
//! Provider envelopes are tried first; anything else falls back to the
//! status-code classifier.

use super::LlmError;
use crate::config::ProviderKind;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Classify a non-success HTTP answer from `provider`.
pub fn classify_http_error(
    provider: ProviderKind,
    status: u16,
    body_text: &str,
    headers: &HeaderMap,
) -> LlmError {
    let name = provider.as_str();
    let classified = match provider {
        ProviderKind::Anthropic => classify_anthropic_http_error(name, status, body_text),
        ProviderKind::OpenAi | ProviderKind::Ollama => {
            classify_openai_compatible_http_error(name, status, body_text)
        }
    };
    classified.unwrap_or_else(|| classify_by_status(name, status, body_text, headers))
}

/// Classify Anthropic HTTP errors by parsing the structured error envelope.
///
/// Anthropic returns `{ "type": "error", "error": { "type": "...", "message": "..." } }`.
/// Returns `None` when the body doesn't match.
pub fn classify_anthropic_http_error(
    provider: &str,
    status: u16,
    body_text: &str,
) -> Option<LlmError> {
    let json: Value = serde_json::from_str(body_text).ok()?;
    let error_obj = json.get("error")?;
    let error_type = error_obj.get("type").and_then(|v| v.as_str())?;
    let message = error_obj
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");

    let mapped = match error_type {
        "authentication_error" => LlmError::AuthenticationError(message.to_string()),
        "permission_error" => {
            LlmError::AuthenticationError(format!("Permission denied: {message}"))
        }
        "not_found_error" => LlmError::NotFound(message.to_string()),
        "rate_limit_error" => LlmError::RateLimitError(message.to_string()),
        "invalid_request_error" => LlmError::InvalidInput(message.to_string()),
        "overloaded_error" => LlmError::api_error_with_details(
            503,
            format!("{provider} service overloaded: {message}"),
            json.clone(),
        ),
        other => LlmError::api_error_with_details(
            status,
            format!("{provider} error ({other}): {message}"),
            json.clone(),
        ),
    };
    Some(mapped)
}

/// Classify OpenAI-compatible HTTP errors by parsing the standard error envelope.
///
/// OpenAI-style APIs (Ollama included) return
/// `{ "error": { "message": "...", "type": "...", "code": "..." } }`.
pub fn classify_openai_compatible_http_error(
    provider: &str,
    status: u16,
    body_text: &str,
) -> Option<LlmError> {
    let json: Value = serde_json::from_str(body_text).ok()?;
    let error_obj = json.get("error")?;

    // Ollama sometimes sends `{"error": "model not found"}`
    let (message, error_type, error_code) = match error_obj {
        Value::String(s) => (s.as_str(), None, None),
        obj => (
            obj.get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error"),
            obj.get("type").and_then(|v| v.as_str()),
            obj.get("code").and_then(|v| v.as_str()),
        ),
    };

    if error_code == Some("insufficient_quota") {
        return Some(LlmError::QuotaExceededError(message.to_string()));
    }

    let mapped = match error_type.unwrap_or("") {
        "authentication_error" => LlmError::AuthenticationError(message.to_string()),
        "rate_limit_error" => LlmError::RateLimitError(message.to_string()),
        "insufficient_quota" => LlmError::QuotaExceededError(message.to_string()),
        "not_found_error" => LlmError::NotFound(message.to_string()),
        _ if status == 401 => LlmError::AuthenticationError(message.to_string()),
        _ if status == 403 => {
            LlmError::AuthenticationError(format!("Permission denied: {message}"))
        }
        _ if status == 429 => LlmError::RateLimitError(message.to_string()),
        _ if status == 404 => LlmError::NotFound(message.to_string()),
        "invalid_request_error" => LlmError::InvalidInput(message.to_string()),
        "" => LlmError::api_error_with_details(
            status,
            format!("{provider} API error: {message}"),
            json.clone(),
        ),
        other => LlmError::api_error_with_details(
            status,
            format!("{provider} API error ({other}): {message}"),
            json.clone(),
        ),
    };
    Some(mapped)
}

fn classify_by_status(provider: &str, status: u16, body_text: &str, headers: &HeaderMap) -> LlmError {
    let request_id = headers
        .get("x-request-id")
        .or_else(|| headers.get("request-id"))
        .and_then(|v| v.to_str().ok())
        .map(|id| format!(" request_id={id}"))
        .unwrap_or_default();
    // Limit body sample size to avoid noisy logs
    let body_sample = body_text.chars().take(200).collect::<String>();

    match status {
        401 | 403 => LlmError::AuthenticationError(format!(
            "provider={provider} http={status}{request_id} body_sample={body_sample}"
        )),
        404 => LlmError::NotFound(format!(
            "provider={provider} http=404{request_id} body_sample={body_sample}"
        )),
        429 => {
            let retry_after = headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            LlmError::RateLimitError(format!(
                "provider={provider} http=429 retry_after={retry_after}{request_id} body_sample={body_sample}"
            ))
        }
        _ => LlmError::api_error(
            status,
            format!("provider={provider}{request_id} body_sample={body_sample}"),
        ),
    }
}
