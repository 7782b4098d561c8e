//! crates/logging/src/logger.rs
//! The logger core: level filter, record building, formatting and sink dispatch.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::builder::MessageBuilder;
use crate::config::{LoggerConfig, LoggerConfigUpdate};
use crate::error::LoggingError;
use crate::format::SharedFormatter;
use crate::levels::{Level, is_enabled};
use crate::record::Arg;
use crate::sink::{LevelMap, SharedSink};

#[derive(Clone)]
struct Plugins {
    default_sink: SharedSink,
    formatter: SharedFormatter,
    sink_map: LevelMap,
}

/// A single logical logger.
///
/// Each `log()` call passes through four stages, strictly in order on the
/// caller's thread:
///
/// 1. the level filter (one atomic load and one comparison),
/// 2. [`MessageBuilder`] normalisation,
/// 3. the formatter,
/// 4. the sink mapped for the level, or the default sink when unmapped.
///
/// Formatter and sink failures are returned to the caller unchanged and leave
/// the logger untouched. Plugin handles are cloned out of the lock before
/// they run, so a plugin may itself log or reconfigure the logger.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, LoggerConfig, args};
///
/// let logger = Logger::new(LoggerConfig::new().with_level(Level::Warn));
/// assert!(logger.is_enabled(Level::Error));
/// assert!(!logger.is_enabled(Level::Info));
/// logger.error(args!["disk ", 3, " failing"]).unwrap();
/// ```
pub struct Logger {
    threshold: AtomicU8,
    plugins: RwLock<Plugins>,
}

impl Logger {
    /// Creates a logger from a complete configuration.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        let LoggerConfig {
            level,
            default_sink,
            formatter,
            sink_map,
        } = config;

        Self {
            threshold: AtomicU8::new(level.as_u8()),
            plugins: RwLock::new(Plugins {
                default_sink,
                formatter,
                sink_map,
            }),
        }
    }

    /// Returns the current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.threshold.load(Ordering::Acquire)).unwrap_or(Level::Off)
    }

    /// Replaces the threshold.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.as_u8(), Ordering::Release);
    }

    /// Reports whether a call at `level` would be emitted.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        is_enabled(level, self.level())
    }

    /// Resolves the sink for `level`.
    ///
    /// The lookup is never cached: a level without an override always resolves
    /// to the default sink current at the time of the call.
    #[must_use]
    pub fn sink(&self, level: Level) -> SharedSink {
        let plugins = self.read();
        plugins.sink_map.resolve(level, &plugins.default_sink)
    }

    /// Returns the current default sink.
    #[must_use]
    pub fn default_sink(&self) -> SharedSink {
        Arc::clone(&self.read().default_sink)
    }

    /// Returns the current formatter.
    #[must_use]
    pub fn formatter(&self) -> SharedFormatter {
        Arc::clone(&self.read().formatter)
    }

    /// Returns the levels that currently carry an explicit sink override.
    #[must_use]
    pub fn mapped_levels(&self) -> Vec<Level> {
        self.read().sink_map.levels().collect()
    }

    /// Returns a complete configuration equal to the current state.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        let plugins = self.read().clone();
        LoggerConfig {
            level: self.level(),
            default_sink: plugins.default_sink,
            formatter: plugins.formatter,
            sink_map: plugins.sink_map,
        }
    }

    /// Merges a partial configuration into the live state.
    ///
    /// All fields of the update are applied under a single write lock, so a
    /// concurrent `log()` observes either the old or the new state.
    pub fn set_config(&self, update: LoggerConfigUpdate) {
        if update.is_empty() {
            return;
        }
        let mut guard = self.write();
        let plugins = &mut *guard;
        update.apply(
            &mut plugins.default_sink,
            &mut plugins.formatter,
            &mut plugins.sink_map,
        );
    }

    /// Installs (`Some`) or clears (`None`) the sink override for `level`.
    pub fn set_level_sink(&self, level: Level, sink: Option<SharedSink>) {
        self.write().sink_map.set(level, sink);
    }

    /// Replaces every field, threshold included.
    pub fn replace_config(&self, config: LoggerConfig) {
        let mut plugins = self.write();
        plugins.default_sink = config.default_sink;
        plugins.formatter = config.formatter;
        plugins.sink_map = config.sink_map;
        self.set_level(config.level);
    }

    /// Emits one call at `level`.
    ///
    /// Returns `Ok(())` without touching any plugin when the level is filtered.
    ///
    /// # Errors
    ///
    /// [`LoggingError::Formatter`] when the formatter fails (the sink is then
    /// not invoked) and [`LoggingError::Sink`] when the sink fails.
    pub fn log(&self, level: Level, args: Vec<Arg>) -> Result<(), LoggingError> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let (formatter, sink) = {
            let plugins = self.read();
            (
                Arc::clone(&plugins.formatter),
                plugins.sink_map.resolve(level, &plugins.default_sink),
            )
        };

        let record = MessageBuilder::build(level, args);
        let output = formatter.format(&record).map_err(LoggingError::Formatter)?;
        sink.write(&output).map_err(LoggingError::Sink)
    }

    /// Emits one call at a raw numeric level.
    ///
    /// # Errors
    ///
    /// [`LoggingError::InvalidLevel`] for values outside `0..=6`, before any
    /// plugin runs; otherwise as [`Logger::log`].
    pub fn log_value(&self, level: u8, args: Vec<Arg>) -> Result<(), LoggingError> {
        let level = Level::try_from(level)?;
        self.log(level, args)
    }

    /// Emits at [`Level::Fatal`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn fatal(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Fatal, args)
    }

    /// Emits at [`Level::Error`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn error(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Error, args)
    }

    /// Emits at [`Level::Warn`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn warn(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Warn, args)
    }

    /// Emits at [`Level::Info`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn info(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Info, args)
    }

    /// Emits at [`Level::Debug`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn debug(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Debug, args)
    }

    /// Emits at [`Level::Trace`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn trace(&self, args: Vec<Arg>) -> Result<(), LoggingError> {
        self.log(Level::Trace, args)
    }

    fn read(&self) -> RwLockReadGuard<'_, Plugins> {
        self.plugins.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Plugins> {
        self.plugins.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl From<LoggerConfig> for Logger {
    fn from(config: LoggerConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("sink_map", &self.read().sink_map)
            .finish_non_exhaustive()
    }
}
