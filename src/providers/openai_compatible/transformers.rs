//! Request/response transformation for OpenAI-compatible providers

use serde::Deserialize;

use crate::types::CompletionRequest;

/// Build a `/chat/completions` body.
///
/// The system message is only sent when a system prompt is present.
pub fn transform_chat(request: &CompletionRequest, stream: bool) -> serde_json::Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system_prompt {
        messages.push(serde_json::json!({ "role": "system", "content": system }));
    }
    messages.push(serde_json::json!({ "role": "user", "content": request.user_message }));

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
    });
    if stream {
        body["stream"] = serde_json::Value::Bool(true);
    }
    body
}

/// Non-streaming chat completion response (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, or `""`.
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }
}
