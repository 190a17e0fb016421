//! Mock API tests for the Anthropic backend
//!
//! Shapes follow https://docs.anthropic.com/en/api/messages-streaming

use futures_util::StreamExt;
use quickprompt::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_event(name: &str, data: serde_json::Value) -> String {
    format!("event: {name}\ndata: {data}\n\n")
}

fn answer_stream(text: &str) -> String {
    [
        sse_event(
            "message_start",
            json!({"type":"message_start","message":{"id":"msg_01","type":"message","role":"assistant","content":[],"model":"claude-sonnet-4-6","usage":{"input_tokens":10,"output_tokens":1}}}),
        ),
        sse_event(
            "content_block_start",
            json!({"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}),
        ),
        sse_event("ping", json!({"type":"ping"})),
        sse_event(
            "content_block_delta",
            json!({"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":text}}),
        ),
        sse_event("content_block_stop", json!({"type":"content_block_stop","index":0})),
        sse_event(
            "message_delta",
            json!({"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":2}}),
        ),
        sse_event("message_stop", json!({"type":"message_stop"})),
    ]
    .concat()
}

fn client_for(server: &MockServer) -> CompletionClient {
    let config = AppConfig::from_json(
        &json!({
            "provider": "anthropic",
            "global_model": "claude-sonnet-4-6",
            "anthropic_api_key": "sk-ant-test",
            "anthropic_base_url": server.uri(),
        })
        .to_string(),
    )
    .unwrap();
    CompletionClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_anthropic_stream_text_then_done() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-6",
            "system": "Be terse.",
            "max_tokens": 4096,
            "stream": true,
            "messages": [{ "role": "user", "content": "2+2?" }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(answer_stream("4"), "text/event-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut stream = client.create_stream("claude-sonnet-4-6", Some("Be terse."), "2+2?");

    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        fragments.push(item.unwrap());
    }
    assert_eq!(
        fragments,
        vec![StreamFragment::text("4"), StreamFragment::done()]
    );
}

#[tokio::test]
async fn test_anthropic_stream_error_event() {
    let mock_server = MockServer::start().await;

    let body = [
        sse_event(
            "content_block_delta",
            json!({"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"par"}}),
        ),
        sse_event(
            "error",
            json!({"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}),
        ),
    ]
    .concat();

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut stream = client.create_stream("claude-sonnet-4-6", None, "hi");

    assert_eq!(stream.next().await.unwrap().unwrap(), StreamFragment::text("par"));
    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.to_string().contains("Overloaded"), "{err}");
    assert!(stream.next().await.is_none(), "no done after an error");
}

#[tokio::test]
async fn test_anthropic_rate_limit_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_json(json!({
                    "type": "error",
                    "error": { "type": "rate_limit_error", "message": "Number of requests has exceeded your rate limit" }
                })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .create_completion("claude-sonnet-4-6", "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RateLimitError(_)), "{err:?}");
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_anthropic_completion_reads_first_text_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({
            "max_tokens": 1024,
            "messages": [{ "role": "user", "content": "Capital of France?" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_02",
            "type": "message",
            "role": "assistant",
            "model": "claude-sonnet-4-6",
            "content": [{ "type": "text", "text": " Paris \n" }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 12, "output_tokens": 3 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let text = client
        .create_completion("claude-sonnet-4-6", "Capital of France?")
        .await
        .unwrap();
    assert_eq!(text, "Paris");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("system").is_none());
    assert!(body.get("stream").is_none());
}
