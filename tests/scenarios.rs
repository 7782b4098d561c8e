//! End-to-end scenarios across the workspace crates.
//!
//! These tests wire the logging core, the concrete sinks and the capture sink
//! together the way an application and its test suite would.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pluglog::logging::exit::{self, ExitError};
use pluglog::logging::settings::FormatKind;
use pluglog::prelude::*;
use pluglog::sinks::console;
use serde_json::{Value, json};
use test_support::TestSink;

static MANAGER_LOCK: Mutex<()> = Mutex::new(());

fn fresh_manager() -> MutexGuard<'static, ()> {
    let guard = MANAGER_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    Manager::reset();
    guard
}

// ============================================================================
// Round Trip Tests
// ============================================================================

/// Verifies a JSON-formatted call parses back into its parts.
#[test]
fn json_round_trip_through_buffer() {
    let buffer = BufferSink::new();
    let logger = Logger::new(
        LoggerConfig::new()
            .with_default_sink(buffer.shared())
            .with_formatter(Arc::new(JsonFormatter::new())),
    );

    logger.info(args!["x", json!({"a": 1})]).unwrap();

    let last = buffer.last_output().unwrap();
    let parsed: Value = serde_json::from_str(last.as_text().unwrap()).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["message"], "x");
    assert_eq!(parsed["args"], json!([{"a": 1}]));
}

/// Verifies a caller-supplied timestamp reaches the formatted output.
#[test]
fn supplied_timestamp_is_formatted() {
    let buffer = BufferSink::new();
    let logger = Logger::new(
        LoggerConfig::new()
            .with_level(Level::Fatal)
            .with_default_sink(buffer.shared())
            .with_formatter(Arc::new(JsonFormatter::structured())),
    );

    logger.fatal(args!["2025-01-15T10:30:00.000Z", "boom"]).unwrap();

    let last = buffer.last_output().unwrap();
    let value = last.as_json().unwrap();
    assert_eq!(value["timestamp"], "2025-01-15T10:30:00.000Z");
    assert_eq!(value["message"], "boom");
    assert_eq!(value["args"], json!([]));
}

// ============================================================================
// Manager Scenarios
// ============================================================================

/// Verifies per-level capture through the shared logger.
#[test]
fn manager_routes_levels_into_capture_sessions() {
    let _guard = fresh_manager();
    let capture = TestSink::new();
    let fallback = BufferSink::new();

    let manager = Manager::create(
        LoggerConfig::new()
            .with_level(Level::Debug)
            .with_formatter(Arc::new(PlainFormatter::without_timestamps()))
            .with_default_sink(fallback.shared()),
    )
    .unwrap();
    manager.set_logger(Level::Error, Some(capture.sink_for(Level::Error)));

    capture.start_test("errors").unwrap();
    let logger = get_logger().unwrap();
    logger.error(args!["db ", "down"]).unwrap();
    logger.info(args!["retrying"]).unwrap();
    capture.end_test("errors");

    assert_eq!(
        capture.messages_for("errors", Level::Error),
        [Output::from("[ERROR] db down")]
    );
    assert_eq!(fallback.lines(), ["[INFO] retrying"]);
    Manager::reset();
}

/// Verifies the global exit helpers log before returning the exit request.
#[test]
fn global_exit_helpers_log_first() {
    let _guard = fresh_manager();
    let buffer = BufferSink::new();
    Manager::create(
        LoggerConfig::new()
            .with_formatter(Arc::new(PlainFormatter::without_timestamps()))
            .with_default_sink(buffer.shared()),
    )
    .unwrap();

    let exit = exit::fatal_exit_global(12, "stream corrupted");
    assert!(matches!(exit, ExitError::Exit { code: 12, .. }));
    assert_eq!(buffer.lines(), ["[FATAL] stream corrupted"]);
    Manager::reset();
}

/// Verifies a failing sink turns the exit request into a log failure.
#[test]
fn exit_helper_reports_sink_failure() {
    let capture = TestSink::new();
    let logger = Logger::new(LoggerConfig::new());
    logger.set_config(capture.logger_map());

    let exit = exit::error_exit(&logger, 1, "no session");
    assert_eq!(exit.code(), 1);
    assert!(matches!(
        exit,
        ExitError::Log {
            source: LoggingError::Sink(_),
            ..
        }
    ));
}

// ============================================================================
// Settings Scenarios
// ============================================================================

/// Verifies console configuration maps every level and keeps the threshold.
#[test]
fn console_configuration_from_settings() {
    let settings = LoggerSettings::from_json_str(r#"{"level": 5, "format": "record"}"#).unwrap();
    assert_eq!(settings.format, FormatKind::Record);

    let logger = Logger::new(console::configure(settings));
    assert_eq!(logger.level(), Level::Debug);
    assert_eq!(logger.mapped_levels().len(), 6);
    assert!(!logger.is_enabled(Level::Trace));
}

/// Verifies a writer sink receives plain lines for its mapped level only.
#[test]
fn writer_sink_receives_only_its_level() {
    let warnings = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new(
        LoggerConfig::new()
            .with_level(Level::Trace)
            .with_formatter(Arc::new(PlainFormatter::without_timestamps())),
    );
    logger.set_config(LoggerConfigUpdate::new().map_level(Level::Warn, warnings.clone()));

    logger.warn(args!["quota at ", 95, "%"]).unwrap();
    logger.error(args!["not here"]).unwrap();

    warnings.with_writer(|bytes| {
        assert_eq!(String::from_utf8_lossy(bytes), "[WARN] quota at 95%\n");
    });
}
