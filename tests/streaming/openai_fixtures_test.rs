//! OpenAI-compatible streaming fixtures tests

use quickprompt::LlmError;
use quickprompt::config::ProviderKind;
use quickprompt::providers::openai_compatible::OpenAiCompatibleEventConverter;
use quickprompt::utils::streaming::StreamSignal;

#[path = "../support/stream_fixture.rs"]
mod support;

#[tokio::test]
async fn openai_deltas_then_stop_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("tests/fixtures/openai/hi_there_stop.sse")
        .expect("load fixture");

    let signals = support::collect_signals(
        bytes,
        OpenAiCompatibleEventConverter::new(ProviderKind::OpenAi),
    )
    .await
    .expect("convert ok");

    assert_eq!(
        signals,
        vec![
            StreamSignal::Delta("Hi".to_string()),
            StreamSignal::Delta(" there!".to_string()),
            StreamSignal::Stop,
        ]
    );
}

#[tokio::test]
async fn ollama_stream_without_stop_reason_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("tests/fixtures/openai/no_stop_reason.sse")
        .expect("load fixture");

    let signals = support::collect_signals(
        bytes,
        OpenAiCompatibleEventConverter::new(ProviderKind::Ollama),
    )
    .await
    .expect("convert ok");

    let (text, stopped) = support::text_until_stop(&signals);
    assert_eq!(text, "Paris is the capital.");
    assert!(!stopped, "length is not a stop reason");
}

#[tokio::test]
async fn openai_error_event_fixture() {
    let bytes = support::load_sse_fixture_as_bytes("tests/fixtures/openai/error_event.sse")
        .expect("load fixture");

    let err = support::collect_signals(
        bytes,
        OpenAiCompatibleEventConverter::new(ProviderKind::OpenAi),
    )
    .await
    .unwrap_err();

    match err {
        LlmError::ApiError { message, .. } => {
            assert!(message.contains("The server had an error"), "{message}")
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}
