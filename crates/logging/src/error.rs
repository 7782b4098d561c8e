//! crates/logging/src/error.rs
//! Error taxonomy surfaced by the logging core.

use std::error::Error as StdError;

use thiserror::Error;

/// Error raised by a formatter or sink plugin.
///
/// The core never inspects or rewraps the payload beyond tagging which plugin
/// failed, so callers can downcast to the plugin's own error type.
pub type PluginError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors produced by the logging core.
///
/// Configuration errors (`AlreadyInitialized`, `NotInitialized`,
/// `InvalidLevel`) are usage mistakes reported at the call site. Plugin errors
/// carry the failure raised by the formatter or sink of a single `log()` call;
/// the logger state is untouched and the next call proceeds normally.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// [`Manager::create`](crate::Manager::create) was called while a manager exists.
    #[error("logger manager is already initialised; reset it before creating another")]
    AlreadyInitialized,
    /// The manager was accessed before [`Manager::create`](crate::Manager::create).
    #[error("logger manager is not initialised")]
    NotInitialized,
    /// A numeric level outside `0..=6` was supplied.
    #[error("log level {0} is outside the supported range 0-6")]
    InvalidLevel(u8),
    /// The formatter rejected the record.
    #[error("formatter failed: {0}")]
    Formatter(#[source] PluginError),
    /// The sink rejected the formatted output.
    #[error("sink failed: {0}")]
    Sink(#[source] PluginError),
}

impl LoggingError {
    /// Reports whether the error originated in a formatter or sink.
    #[must_use]
    pub const fn is_plugin_failure(&self) -> bool {
        matches!(self, Self::Formatter(_) | Self::Sink(_))
    }

    /// Borrows the plugin's original error, if any.
    #[must_use]
    pub fn plugin_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Formatter(error) | Self::Sink(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Consumes the error and returns the plugin's original error, if any.
    #[must_use]
    pub fn into_plugin_error(self) -> Option<PluginError> {
        match self {
            Self::Formatter(error) | Self::Sink(error) => Some(error),
            _ => None,
        }
    }
}
