use lc_telemetry::logging::{self, LogFormat};

#[test]
fn test_init_logging_human() {
    // Should not panic; second call is a safe no-op.
    logging::init_logging("lc-test", "debug");
    logging::init_logging("lc-test", "info");

    tracing::info!(key = "value", "human-readable log line");
}

#[test]
fn test_init_logging_json() {
    // The global subscriber may already be set by another test; this must
    // then silently no-op.
    logging::init_logging_json("lc-test-json", "info");

    tracing::info!(key = "value", "json log line");
}

#[test]
fn test_init_dispatches_on_format() {
    logging::init("lc-test", "warn", LogFormat::Json);
    logging::init("lc-test", "warn", LogFormat::Human);
}

#[test]
fn test_custom_directive_does_not_panic() {
    logging::init_logging("lc-test", "lc_core=trace,warn");
}
