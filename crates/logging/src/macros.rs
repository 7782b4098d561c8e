//! crates/logging/src/macros.rs
//! Argument and level-gated logging macros.
//!
//! The level macros consult the threshold before any argument is converted, so
//! a filtered call costs one comparison. Each macro evaluates to the
//! `Result<(), LoggingError>` of the call, `Ok(())` when filtered.

/// Builds a `Vec<Arg>` from heterogeneous expressions.
///
/// # Example
/// ```
/// use logging::{Arg, args};
/// use serde_json::json;
///
/// let raw = args!["id=", 7, json!({"ok": true})];
/// assert_eq!(raw[1], Arg::Int(7));
/// assert!(!raw[2].is_primitive());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Logs at a runtime level when that level is enabled.
///
/// # Example
/// ```
/// use logging::{Level, Logger, log_at};
///
/// let logger = Logger::default();
/// log_at!(logger, Level::Info, "started in ", 12, "ms").unwrap();
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $arg:expr)*) => {{
        let logger = &$logger;
        let level: $crate::Level = $level;
        if logger.is_enabled(level) {
            logger.log(level, $crate::args![$($arg),*])
        } else {
            ::core::result::Result::<(), $crate::LoggingError>::Ok(())
        }
    }};
}

/// Logs at [`Level::Fatal`](crate::Level::Fatal).
///
/// # Example
/// ```
/// use logging::{Logger, fatal_log};
///
/// fatal_log!(Logger::default(), "cannot open ", "/etc/app.toml").unwrap();
/// ```
#[macro_export]
macro_rules! fatal_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Fatal $(, $arg)*)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Error $(, $arg)*)
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! warn_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Warn $(, $arg)*)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Info $(, $arg)*)
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Debug $(, $arg)*)
    };
}

/// Logs at [`Level::Trace`](crate::Level::Trace).
#[macro_export]
macro_rules! trace_log {
    ($logger:expr $(, $arg:expr)*) => {
        $crate::log_at!($logger, $crate::Level::Trace $(, $arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::format::{Output, RecordFormatter};
    use crate::{Arg, Level, Logger, LoggerConfig, sink};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn empty_args_macro_builds_empty_vec() {
        let raw: Vec<Arg> = args![];
        assert!(raw.is_empty());
        assert_eq!(args!["a", 1u8,].len(), 2);
    }

    #[test]
    fn filtered_macro_does_not_evaluate_arguments() {
        let evaluated = AtomicUsize::new(0);
        let expensive = || {
            evaluated.fetch_add(1, Ordering::SeqCst);
            "costly"
        };
        let logger = Logger::new(LoggerConfig::new().with_level(Level::Warn));

        debug_log!(logger, expensive()).unwrap();
        assert_eq!(evaluated.load(Ordering::SeqCst), 0);

        error_log!(logger, expensive()).unwrap();
        assert_eq!(evaluated.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn level_macros_route_to_their_level() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let logger = Arc::new(Logger::new(
            LoggerConfig::new()
                .with_level(Level::Trace)
                .with_formatter(Arc::new(RecordFormatter))
                .with_default_sink(sink::from_fn(move |output: &Output| {
                    let record = output.as_record().map(|r| (r.level, r.message.clone()));
                    captured.lock().unwrap().extend(record);
                    Ok(())
                })),
        ));

        fatal_log!(logger, "f").unwrap();
        warn_log!(logger, "w", 1).unwrap();
        info_log!(logger, "i").unwrap();
        trace_log!(logger).unwrap();
        log_at!(logger, Level::Off, "never").unwrap();

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [
                (Level::Fatal, "f".to_owned()),
                (Level::Warn, "w1".to_owned()),
                (Level::Info, "i".to_owned()),
                (Level::Trace, String::new()),
            ]
        );
    }
}
