//! Request/response transformation for the Anthropic Messages API

use serde::Deserialize;

use crate::types::CompletionRequest;

/// `max_tokens` for streamed answers.
pub const STREAM_MAX_TOKENS: u32 = 4096;
/// `max_tokens` for one-shot completions.
pub const COMPLETION_MAX_TOKENS: u32 = 1024;

/// Build a `/v1/messages` body with a single user turn.
pub fn transform_messages(request: &CompletionRequest, stream: bool) -> serde_json::Value {
    let max_tokens = if stream {
        STREAM_MAX_TOKENS
    } else {
        COMPLETION_MAX_TOKENS
    };
    let mut body = serde_json::json!({
        "model": request.model,
        "max_tokens": max_tokens,
        "messages": [{ "role": "user", "content": request.user_message }],
    });
    if let Some(system) = &request.system_prompt {
        body["system"] = serde_json::Value::String(system.clone());
    }
    if stream {
        body["stream"] = serde_json::Value::Bool(true);
    }
    body
}

/// Non-streaming Messages API response (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Trimmed text of the first content block if it is a text block, else `""`.
    pub fn first_text(&self) -> String {
        match self.content.first() {
            Some(block) if block.block_type == "text" => block
                .text
                .as_deref()
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_body_carries_system_and_budget() {
        let req = CompletionRequest::new("claude-haiku-4-5", "2+2?").with_system_prompt("Be terse.");
        let body = transform_messages(&req, true);
        assert_eq!(body["max_tokens"], STREAM_MAX_TOKENS);
        assert_eq!(body["system"], "Be terse.");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "2+2?");
    }

    #[test]
    fn completion_body_has_smaller_budget_and_no_system() {
        let body = transform_messages(&CompletionRequest::new("claude-haiku-4-5", "hi"), false);
        assert_eq!(body["max_tokens"], COMPLETION_MAX_TOKENS);
        assert!(body.get("system").is_none());
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn first_text_only_reads_leading_text_block() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_1","type":"message","role":"assistant","content":[{"type":"text","text":" 4 "}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), "4");

        let resp: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"t1","name":"x","input":{}},{"type":"text","text":"later"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), "");

        let resp: MessagesResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(resp.first_text(), "");
    }
}
