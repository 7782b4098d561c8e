#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a level-filtered logging core built from replaceable parts. A
//! [`Logger`] routes each call through a level filter, the
//! [`MessageBuilder`], a [`Formatter`] and the [`Sink`] mapped for the call's
//! level, falling back to a default sink when the level has no override. A
//! process-wide [`Manager`] owns one shared logger and merges partial
//! configuration updates into it without discarding earlier settings.
//!
//! # Design
//!
//! - [`Level`] is a `repr(u8)` scale from [`Level::Off`] to [`Level::Trace`];
//!   smaller values are more severe. The threshold lives in an atomic so a
//!   filtered call costs one load and one comparison.
//! - Call arguments are classified at the boundary into [`Arg`] values.
//!   Leading primitives form the record message; everything from the first
//!   structured argument onward is kept verbatim.
//! - Formatter, default sink and the fixed-size [`LevelMap`] of per-level
//!   overrides sit behind a read/write lock. `log()` clones the handles it
//!   needs and releases the lock before running any plugin.
//! - [`LoggerConfigUpdate`] merges field by field: a per-level override always
//!   wins over the default sink until that override is cleared.
//!
//! # Invariants
//!
//! - Every level resolves to a sink at lookup time; unmapped levels use the
//!   default sink current at the time of the call.
//! - Exactly one [`LogRecord`] is built per emitted call, and the formatter
//!   finishes before the sink starts.
//! - A failing plugin leaves the logger untouched; the next call proceeds.
//!
//! # Errors
//!
//! Every fallible operation returns [`LoggingError`]. Formatter and sink
//! failures arrive as [`LoggingError::Formatter`] and [`LoggingError::Sink`]
//! carrying the plugin's own error, which can be recovered with
//! [`LoggingError::into_plugin_error`].
//!
//! # Examples
//!
//! Route errors to a dedicated sink while everything else goes to the default:
//!
//! ```
//! use logging::{Level, Logger, LoggerConfig, LoggerConfigUpdate, Output, args, sink};
//! use std::sync::{Arc, Mutex};
//!
//! let errors = Arc::new(Mutex::new(Vec::new()));
//! let captured = Arc::clone(&errors);
//! let error_sink = sink::from_fn(move |output: &Output| {
//!     captured.lock().unwrap().push(output.to_string());
//!     Ok(())
//! });
//!
//! let logger = Logger::new(LoggerConfig::new().with_level(Level::Debug));
//! logger.set_config(LoggerConfigUpdate::new().map_level(Level::Error, error_sink));
//!
//! logger.info(args!["ignored by the error sink"]).unwrap();
//! logger.error(args!["disk ", 3, " failed"]).unwrap();
//!
//! let errors = errors.lock().unwrap();
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].ends_with("[ERROR] disk 3 failed"));
//! ```
//!
//! # See also
//!
//! - `logging-sink` for console, writer and in-memory sinks.
//! - `test-support` for session-scoped capture sinks used in tests.

mod builder;
mod config;
mod error;
pub mod exit;
pub mod format;
mod levels;
mod logger;
mod macros;
mod manager;
mod record;
pub mod settings;
pub mod sink;
#[cfg(feature = "tracing-bridge")]
mod tracing_bridge;

pub use builder::{MessageBuilder, parse_timestamp};
pub use config::{LoggerConfig, LoggerConfigUpdate};
pub use error::{LoggingError, PluginError};
pub use exit::ExitError;
pub use format::{
    Formatter, JsonFormatter, Output, PlainFormatter, RecordFormatter, SharedFormatter,
};
pub use levels::{Level, ParseLevelError, is_enabled};
pub use logger::Logger;
pub use manager::{Manager, get_logger};
pub use record::{Arg, LogRecord, UNSERIALIZABLE_MARKER};
pub use settings::{FormatKind, LoggerSettings};
pub use sink::{LevelMap, NullSink, SharedSink, Sink};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::{LoggerLayer, init_tracing_bridge, init_tracing_bridge_with_filter};
