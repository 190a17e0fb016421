//! Test fixtures utilities: load SSE chunks and drive event converters

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use quickprompt::LlmError;
use quickprompt::utils::streaming::{SseEventConverter, StreamSignal};
use std::io;

/// Load an `.sse` fixture file and split it into SSE chunks (separated by blank lines)
pub fn load_sse_fixture_as_bytes(path: &str) -> io::Result<Vec<Result<Vec<u8>, io::Error>>> {
    let raw = std::fs::read_to_string(path)?;
    let normalized = raw.replace("\r\n", "\n");
    let mut out = Vec::new();
    for chunk in normalized.split("\n\n") {
        let s = chunk.trim_end_matches('\n');
        if s.is_empty() {
            continue;
        }
        // Restore SSE event blank line terminator
        let mut owned = String::from(s);
        owned.push_str("\n\n");
        out.push(Ok(owned.into_bytes()));
    }
    Ok(out)
}

/// Run every event through `converter`, skipping the same keep-alive and
/// `[DONE]` payloads the stream factory skips. Stops at the first error.
pub async fn collect_signals<C>(
    bytes: Vec<Result<Vec<u8>, io::Error>>,
    converter: C,
) -> Result<Vec<StreamSignal>, LlmError>
where
    C: SseEventConverter,
{
    let mut events = futures_util::stream::iter(bytes).eventsource();
    let mut signals = Vec::new();
    while let Some(item) = events.next().await {
        let event = item.expect("valid SSE event");
        let data = event.data.trim();
        if data.is_empty() || data == "[DONE]" {
            continue;
        }
        signals.extend(converter.convert_event(&event)?);
    }
    Ok(signals)
}

/// Concatenated deltas up to (not including) the first stop signal, and
/// whether a stop was seen.
pub fn text_until_stop(signals: &[StreamSignal]) -> (String, bool) {
    let mut text = String::new();
    for signal in signals {
        match signal {
            StreamSignal::Delta(delta) => text.push_str(delta),
            StreamSignal::Stop => return (text, true),
        }
    }
    (text, false)
}
