#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `pluglog` bundles the workspace crates behind one dependency:
//!
//! - [`logging`]: levels, records, the formatter and sink contracts, the
//!   [`Logger`](logging::Logger) core and the process-wide
//!   [`Manager`](logging::Manager).
//! - [`sinks`]: console, writer and in-memory sinks.
//!
//! Session-scoped capture for tests lives in the unpublished `test-support`
//! crate; add it as a dev-dependency.
//!
//! # Examples
//!
//! Build a logger from loader settings and capture its output in memory:
//!
//! ```
//! use pluglog::prelude::*;
//!
//! let settings = LoggerSettings::from_json_str(r#"{"level": "warn", "format": "json", "console": false}"#)
//!     .unwrap();
//! let buffer = BufferSink::new();
//! let logger = Logger::new(settings.into_config(buffer.shared()));
//!
//! logger.info(args!["filtered"]).unwrap();
//! logger.warn(args!["kept"]).unwrap();
//! assert_eq!(buffer.len(), 1);
//! ```

pub use logging;
pub use logging_sink as sinks;

/// Commonly used types and macros.
pub mod prelude {
    pub use logging::{
        Arg, Formatter, JsonFormatter, Level, LogRecord, Logger, LoggerConfig,
        LoggerConfigUpdate, LoggerSettings, LoggingError, Manager, Output, PlainFormatter,
        RecordFormatter, SharedFormatter, SharedSink, Sink, args, get_logger,
    };
    pub use logging_sink::{BufferSink, ConsoleSink, LineMode, WriterSink};
}
