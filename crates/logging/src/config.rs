//! crates/logging/src/config.rs
//! Complete logger configuration and partial updates.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::format::{PlainFormatter, SharedFormatter};
use crate::levels::Level;
use crate::sink::{LevelMap, SharedSink, null_sink};

/// Complete configuration of a [`Logger`](crate::Logger).
///
/// Used when a logger is created or wholesale replaced. Omitted parts default
/// to the [`Level::Info`] threshold, a [`NullSink`](crate::NullSink) default
/// sink, the [`PlainFormatter`] and an empty per-level table.
#[derive(Clone)]
pub struct LoggerConfig {
    pub(crate) level: Level,
    pub(crate) default_sink: SharedSink,
    pub(crate) formatter: SharedFormatter,
    pub(crate) sink_map: LevelMap,
}

impl LoggerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the threshold.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the sink used by levels without an override.
    pub fn with_default_sink(mut self, sink: SharedSink) -> Self {
        self.default_sink = sink;
        self
    }

    /// Sets the formatter.
    pub fn with_formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Installs a per-level override.
    pub fn with_level_sink(mut self, level: Level, sink: SharedSink) -> Self {
        self.sink_map.insert(level, sink);
        self
    }

    /// Replaces the whole per-level table.
    pub fn with_sink_map(mut self, sink_map: LevelMap) -> Self {
        self.sink_map = sink_map;
        self
    }

    /// Applies a partial update on top of this configuration.
    pub fn with_update(mut self, update: LoggerConfigUpdate) -> Self {
        update.apply(
            &mut self.default_sink,
            &mut self.formatter,
            &mut self.sink_map,
        );
        self
    }

    /// Returns the threshold.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the default sink.
    #[must_use]
    pub const fn default_sink(&self) -> &SharedSink {
        &self.default_sink
    }

    /// Returns the formatter.
    #[must_use]
    pub const fn formatter(&self) -> &SharedFormatter {
        &self.formatter
    }

    /// Returns the per-level table.
    #[must_use]
    pub const fn sink_map(&self) -> &LevelMap {
        &self.sink_map
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            default_sink: null_sink(),
            formatter: Arc::new(PlainFormatter::new()),
            sink_map: LevelMap::new(),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level", &self.level)
            .field("sink_map", &self.sink_map)
            .finish_non_exhaustive()
    }
}

/// Partial configuration merged field by field into a live logger.
///
/// - A present default sink replaces the old one. Per-level overrides are
///   untouched; levels without one resolve to the new default on their next
///   lookup.
/// - A present formatter replaces the old one wholesale.
/// - Per-level entries merge key by key: `Some(sink)` installs an override,
///   `None` clears it, and levels not mentioned keep their current state.
///
/// # Examples
///
/// ```
/// use logging::{Level, LoggerConfigUpdate, sink::null_sink};
///
/// let update = LoggerConfigUpdate::new()
///     .default_sink(null_sink())
///     .map_level(Level::Error, null_sink())
///     .clear_level(Level::Warn);
/// assert_eq!(update.level_entries().count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct LoggerConfigUpdate {
    default_sink: Option<SharedSink>,
    formatter: Option<SharedFormatter>,
    sink_map: Option<BTreeMap<Level, Option<SharedSink>>>,
}

impl LoggerConfigUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default sink.
    pub fn default_sink(mut self, sink: SharedSink) -> Self {
        self.default_sink = Some(sink);
        self
    }

    /// Replaces the formatter.
    pub fn formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Installs (`Some`) or clears (`None`) the override for `level`.
    pub fn level_sink(mut self, level: Level, sink: Option<SharedSink>) -> Self {
        self.sink_map
            .get_or_insert_with(BTreeMap::new)
            .insert(level, sink);
        self
    }

    /// Installs an override for `level`.
    pub fn map_level(self, level: Level, sink: SharedSink) -> Self {
        self.level_sink(level, Some(sink))
    }

    /// Clears the override for `level`.
    pub fn clear_level(self, level: Level) -> Self {
        self.level_sink(level, None)
    }

    /// Merges a batch of per-level entries.
    pub fn level_sinks<I>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (Level, Option<SharedSink>)>,
    {
        entries
            .into_iter()
            .fold(self, |update, (level, sink)| update.level_sink(level, sink))
    }

    /// Reports whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_sink.is_none() && self.formatter.is_none() && self.sink_map.is_none()
    }

    /// Reports whether the default sink is replaced.
    #[must_use]
    pub const fn replaces_default_sink(&self) -> bool {
        self.default_sink.is_some()
    }

    /// Reports whether the formatter is replaced.
    #[must_use]
    pub const fn replaces_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Iterates over the per-level entries; `true` marks an installed override.
    pub fn level_entries(&self) -> impl Iterator<Item = (Level, bool)> + '_ {
        self.sink_map
            .iter()
            .flatten()
            .map(|(level, sink)| (*level, sink.is_some()))
    }

    pub(crate) fn apply(
        self,
        default_sink: &mut SharedSink,
        formatter: &mut SharedFormatter,
        sink_map: &mut LevelMap,
    ) {
        if let Some(sink) = self.default_sink {
            *default_sink = sink;
        }
        if let Some(replacement) = self.formatter {
            *formatter = replacement;
        }
        if let Some(entries) = self.sink_map {
            for (level, sink) in entries {
                sink_map.set(level, sink);
            }
        }
    }
}

impl fmt::Debug for LoggerConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<_> = self.level_entries().collect();
        f.debug_struct("LoggerConfigUpdate")
            .field("default_sink", &self.replaces_default_sink())
            .field("formatter", &self.replaces_formatter())
            .field("levels", &levels)
            .finish()
    }
}
