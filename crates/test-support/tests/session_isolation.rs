//! Integration tests for session-scoped capture.
//!
//! These tests verify that sessions and instances never observe each other's
//! output when driven through real loggers.

use std::sync::Arc;

use logging::{Level, Logger, LoggerConfig, LoggingError, Output, RecordFormatter, args};
use test_support::{SessionError, TestSink};

fn captured_logger(capture: &TestSink) -> Logger {
    let logger = Logger::new(
        LoggerConfig::new()
            .with_level(Level::Trace)
            .with_formatter(Arc::new(RecordFormatter)),
    );
    logger.set_config(capture.logger_map());
    logger
}

fn messages(outputs: &[Output]) -> Vec<String> {
    outputs
        .iter()
        .filter_map(Output::as_record)
        .map(|record| record.message.clone())
        .collect()
}

// ============================================================================
// Instance Isolation Tests
// ============================================================================

/// Verifies interleaved logging into two instances stays disjoint.
#[test]
fn interleaved_instances_do_not_share_output() {
    let first = TestSink::new();
    let second = TestSink::new();
    let first_logger = captured_logger(&first);
    let second_logger = captured_logger(&second);

    first.start_test("shared-id").unwrap();
    second.start_test("shared-id").unwrap();

    first_logger.info(args!["a1"]).unwrap();
    second_logger.info(args!["b1"]).unwrap();
    first_logger.info(args!["a2"]).unwrap();
    second_logger.error(args!["b2"]).unwrap();

    assert_eq!(messages(&first.messages(Level::Info).unwrap()), ["a1", "a2"]);
    assert_eq!(messages(&second.messages(Level::Info).unwrap()), ["b1"]);
    assert!(first.messages(Level::Error).unwrap().is_empty());
}

/// Verifies instances on separate threads stay disjoint.
#[test]
fn threaded_instances_stay_disjoint() {
    let handles: Vec<_> = (0..4usize)
        .map(|n| {
            std::thread::spawn(move || {
                let capture = TestSink::new();
                let logger = captured_logger(&capture);
                capture.start_test(format!("worker-{n}")).unwrap();
                for i in 0..25u32 {
                    logger.debug(args![n, ":", i]).unwrap();
                }
                capture.messages(Level::Debug).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let outputs = handle.join().unwrap();
        assert_eq!(outputs.len(), 25);
        assert!(messages(&outputs).iter().all(|m| m.starts_with(&format!("{n}:"))));
    }
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

/// Verifies logging outside a session fails with a downcastable error.
#[test]
fn logging_after_end_fails() {
    let capture = TestSink::new();
    let logger = captured_logger(&capture);

    capture.start_test("one").unwrap();
    logger.warn(args!["inside"]).unwrap();
    assert!(capture.end_test("one"));

    let err = logger.warn(args!["outside"]).unwrap_err();
    assert!(matches!(err, LoggingError::Sink(_)));
    let source = err.into_plugin_error().expect("plugin error");
    assert_eq!(
        *source.downcast::<SessionError>().expect("session error"),
        SessionError::NoActiveTest
    );

    assert_eq!(messages(&capture.messages_for("one", Level::Warn)), ["inside"]);
}

/// Verifies consecutive sessions keep separate buffers.
#[test]
fn consecutive_sessions_are_separate() {
    let capture = TestSink::new();
    let logger = captured_logger(&capture);

    capture.start_test("first").unwrap();
    logger.error(args!["from first"]).unwrap();
    capture.end_test("first");

    capture.start_test("second").unwrap();
    logger.error(args!["from second"]).unwrap();

    assert_eq!(messages(&capture.messages(Level::Error).unwrap()), ["from second"]);
    assert_eq!(
        messages(&capture.messages_for("first", Level::Error)),
        ["from first"]
    );
}

/// Verifies ending a different session leaves the active one running.
#[test]
fn mismatched_end_keeps_session_open() {
    let capture = TestSink::new();
    let logger = captured_logger(&capture);

    capture.start_test("real").unwrap();
    assert!(!capture.end_test("other"));
    logger.info(args!["still recording"]).unwrap();

    let last = capture.last_message(Level::Info).unwrap().unwrap();
    assert_eq!(last.as_record().unwrap().message, "still recording");
}
