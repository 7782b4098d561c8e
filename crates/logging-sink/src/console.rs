//! Console sinks with per-level stream routing.
//!
//! `FATAL`, `ERROR`, `WARN` and `INFO` go to standard error, `DEBUG` and
//! `TRACE` to standard output. Every output is written as one
//! newline-terminated line while the stream lock is held.

use std::io::{self, Write};
use std::sync::Arc;

use logging::{
    Level, LoggerConfig, LoggerConfigUpdate, LoggerSettings, Output, PluginError, SharedSink, Sink,
    sink::null_sink,
};

use crate::line_mode::LineMode;

/// Standard stream targeted by a [`ConsoleSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConsoleStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl ConsoleStream {
    /// Returns the stream used for `level`.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::Debug | Level::Trace => Self::Stdout,
            Level::Off | Level::Fatal | Level::Error | Level::Warn | Level::Info => Self::Stderr,
        }
    }

    fn write_line(self, line: &str) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().lock().write_all(line.as_bytes()),
            Self::Stderr => io::stderr().lock().write_all(line.as_bytes()),
        }
    }
}

/// Sink writing one line per output to a standard stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    /// Creates a sink bound to `stream`.
    #[must_use]
    pub const fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// Creates the sink used for `level`.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        Self::new(ConsoleStream::for_level(level))
    }

    /// Creates a standard-output sink.
    #[must_use]
    pub const fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    /// Creates a standard-error sink.
    #[must_use]
    pub const fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Returns the target stream.
    #[must_use]
    pub const fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn write(&self, output: &Output) -> Result<(), PluginError> {
        let line = LineMode::WithNewline.render(output);
        self.stream.write_line(&line)?;
        Ok(())
    }
}

/// Returns an update mapping every emitting level to its console sink.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, LoggerConfig};
/// use logging_sink::console;
///
/// let logger = Logger::new(LoggerConfig::new());
/// logger.set_config(console::logger_map());
/// assert_eq!(logger.mapped_levels().len(), 6);
/// ```
#[must_use]
pub fn logger_map() -> LoggerConfigUpdate {
    let stdout: SharedSink = Arc::new(ConsoleSink::stdout());
    let stderr: SharedSink = Arc::new(ConsoleSink::stderr());

    Level::ALL
        .into_iter()
        .filter(|level| *level != Level::Off)
        .fold(LoggerConfigUpdate::new(), |update, level| {
            let sink = match ConsoleStream::for_level(level) {
                ConsoleStream::Stdout => Arc::clone(&stdout),
                ConsoleStream::Stderr => Arc::clone(&stderr),
            };
            update.map_level(level, sink)
        })
}

/// Builds a complete configuration from loader settings.
///
/// With `console` enabled the default sink writes to standard error and every
/// level is mapped to its console stream; otherwise output is discarded.
#[must_use]
pub fn configure(settings: LoggerSettings) -> LoggerConfig {
    if settings.console {
        settings
            .into_config(Arc::new(ConsoleSink::stderr()))
            .with_update(logger_map())
    } else {
        settings.into_config(null_sink())
    }
}
