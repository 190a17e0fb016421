//! Anthropic streaming fixtures tests

use quickprompt::LlmError;
use quickprompt::providers::anthropic::AnthropicEventConverter;

#[path = "../support/stream_fixture.rs"]
mod support;

#[tokio::test]
async fn anthropic_message_start_deltas_stop_fixture() {
    let bytes = support::load_sse_fixture_as_bytes(
        "tests/fixtures/anthropic/message_start_deltas_stop.sse",
    )
    .expect("load fixture");

    let signals = support::collect_signals(bytes, AnthropicEventConverter::new())
        .await
        .expect("convert ok");

    let (text, stopped) = support::text_until_stop(&signals);
    assert_eq!(text, "4");
    // The sequence ends when the transport closes, not on message_stop
    assert!(!stopped);
}

#[tokio::test]
async fn anthropic_thinking_is_not_forwarded_fixture() {
    let bytes =
        support::load_sse_fixture_as_bytes("tests/fixtures/anthropic/thinking_and_text.sse")
            .expect("load fixture");

    let signals = support::collect_signals(bytes, AnthropicEventConverter::new())
        .await
        .expect("convert ok");

    let (text, _) = support::text_until_stop(&signals);
    assert_eq!(text, "Hello world");
}

#[tokio::test]
async fn anthropic_error_event_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("tests/fixtures/anthropic/error_event.sse")
        .expect("load fixture");

    let err = support::collect_signals(bytes, AnthropicEventConverter::new())
        .await
        .unwrap_err();

    match err {
        LlmError::ApiError { message, details, .. } => {
            assert!(message.contains("Overloaded"));
            assert_eq!(
                details.and_then(|d| d.get("type").cloned()),
                Some(serde_json::json!("overloaded_error"))
            );
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}
