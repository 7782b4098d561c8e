#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides concrete [`Sink`](logging::Sink) implementations
//! for the `logging` core: console output routed by level, a sink wrapping
//! any [`std::io::Write`] target, and an in-memory buffer.
//!
//! # Design
//!
//! - [`ConsoleSink`] writes to standard error for `FATAL` through `INFO` and
//!   to standard output for `DEBUG` and `TRACE`.
//!   [`console::logger_map`] produces an update binding every level at once,
//!   and [`console::configure`] turns loader settings into a full
//!   configuration.
//! - [`WriterSink`] owns its writer behind a mutex and honours a [`LineMode`].
//! - [`BufferSink`] stores outputs for later inspection; clones share storage.
//!
//! # Invariants
//!
//! - Each `write` results in exactly one `write_all` on the target, so a line
//!   is never split between concurrent callers.
//! - Console and writer sinks terminate lines with `\n` unless
//!   [`LineMode::WithoutNewline`] is selected.
//!
//! # Errors
//!
//! I/O failures are returned as sink errors wrapping the original
//! [`std::io::Error`]; the logger hands them to its caller unchanged.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Logger, LoggerConfig, PlainFormatter, args};
//! use logging_sink::WriterSink;
//! use std::sync::Arc;
//!
//! let file = Arc::new(WriterSink::new(Vec::new()));
//! let logger = Logger::new(
//!     LoggerConfig::new()
//!         .with_formatter(Arc::new(PlainFormatter::without_timestamps()))
//!         .with_level_sink(Level::Warn, file.clone()),
//! );
//! logger.warn(args!["cache ", 91, "% full"]).unwrap();
//!
//! file.with_writer(|bytes| assert_eq!(bytes.as_slice(), b"[WARN] cache 91% full\n"));
//! ```
//!
//! # See also
//!
//! - `logging` for the logger core and the formatter and sink contracts.
//! - `test-support` for session-scoped capture sinks.

mod buffer;
pub mod console;
mod line_mode;
mod writer;

pub use buffer::BufferSink;
pub use console::{ConsoleSink, ConsoleStream};
pub use line_mode::LineMode;
pub use writer::WriterSink;
