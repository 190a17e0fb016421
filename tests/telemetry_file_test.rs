//! File logging installs the process-global subscriber, so it runs in its own test binary.

use quickprompt::telemetry::{OutputFormat, SubscriberConfig, init_subscriber};

#[test]
fn file_logging_writes_through_the_guard() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("quickprompt.log");
    let config = SubscriberConfig::builder()
        .enable_console(false)
        .output_format(OutputFormat::Json)
        .log_file(path.clone())
        .build();

    let guard = init_subscriber(config).unwrap();
    assert!(guard.is_some(), "file writer guard is returned");
    assert!(path.exists());

    tracing::info!(target: "quickprompt::telemetry", "file sink ready");
    // Dropping the guard flushes the non-blocking writer
    drop(guard);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("file sink ready"), "{contents}");
}
