//! crates/logging/src/exit.rs
//! Log-then-exit helpers for CLI and error-handler layers.
//!
//! The helpers log first and only then hand back a typed [`ExitError`]; the
//! caller decides how to terminate. A failing log call is never swallowed: it
//! is returned as [`ExitError::Log`] together with the intended exit code.

use thiserror::Error;

use crate::error::LoggingError;
use crate::levels::Level;
use crate::logger::Logger;
use crate::manager::get_logger;

/// Typed exit request produced after logging.
#[derive(Debug, Error)]
pub enum ExitError {
    /// The message was logged; the process should exit with `code`.
    #[error("{message} (exit code {code})")]
    Exit {
        /// Requested exit status.
        code: i32,
        /// Message that was logged.
        message: String,
    },
    /// Logging the message failed.
    #[error("failed to log exit message (exit code {code}): {source}")]
    Log {
        /// Requested exit status.
        code: i32,
        /// Failure raised by the logger.
        #[source]
        source: LoggingError,
    },
}

impl ExitError {
    /// Returns the requested exit status.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Exit { code, .. } | Self::Log { code, .. } => *code,
        }
    }
}

fn log_then_exit(logger: &Logger, level: Level, code: i32, message: String) -> ExitError {
    match logger.log(level, vec![message.as_str().into()]) {
        Ok(()) => ExitError::Exit { code, message },
        Err(source) => ExitError::Log { code, source },
    }
}

/// Logs `message` at [`Level::Fatal`] and returns the exit request.
#[must_use]
pub fn fatal_exit(logger: &Logger, code: i32, message: impl Into<String>) -> ExitError {
    log_then_exit(logger, Level::Fatal, code, message.into())
}

/// Logs `message` at [`Level::Error`] and returns the exit request.
#[must_use]
pub fn error_exit(logger: &Logger, code: i32, message: impl Into<String>) -> ExitError {
    log_then_exit(logger, Level::Error, code, message.into())
}

/// [`fatal_exit`] against the manager's logger.
///
/// When no manager exists the result is [`ExitError::Log`] carrying
/// [`LoggingError::NotInitialized`].
#[must_use]
pub fn fatal_exit_global(code: i32, message: impl Into<String>) -> ExitError {
    match get_logger() {
        Ok(logger) => fatal_exit(&logger, code, message),
        Err(source) => ExitError::Log { code, source },
    }
}

/// [`error_exit`] against the manager's logger.
#[must_use]
pub fn error_exit_global(code: i32, message: impl Into<String>) -> ExitError {
    match get_logger() {
        Ok(logger) => error_exit(&logger, code, message),
        Err(source) => ExitError::Log { code, source },
    }
}
