//! crates/logging/src/sink.rs
//! Sink contract, the null sink and the per-level sink table.

use std::fmt;
use std::sync::Arc;

use crate::error::PluginError;
use crate::format::Output;
use crate::levels::Level;

/// Side-effecting destination for formatted output.
///
/// A sink receives exactly one [`Output`] per emitted `log()` call. Errors are
/// returned to the caller of `log()` unchanged. Implemented for every
/// `Fn(&Output) -> Result<(), PluginError>` closure.
pub trait Sink: Send + Sync {
    /// Delivers one formatted output.
    fn write(&self, output: &Output) -> Result<(), PluginError>;
}

impl<F> Sink for F
where
    F: Fn(&Output) -> Result<(), PluginError> + Send + Sync,
{
    fn write(&self, output: &Output) -> Result<(), PluginError> {
        self(output)
    }
}

/// Shared handle to a sink.
pub type SharedSink = Arc<dyn Sink>;

/// Wraps a closure as a [`SharedSink`], fixing its signature for inference.
///
/// # Examples
///
/// ```
/// use logging::{Output, Sink, sink};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let captured = Arc::clone(&seen);
/// let sink = sink::from_fn(move |output| {
///     captured.lock().unwrap().push(output.to_string());
///     Ok(())
/// });
///
/// sink.write(&Output::from("hello")).unwrap();
/// assert_eq!(seen.lock().unwrap().as_slice(), ["hello"]);
/// ```
pub fn from_fn<F>(sink: F) -> SharedSink
where
    F: Fn(&Output) -> Result<(), PluginError> + Send + Sync + 'static,
{
    Arc::new(sink)
}

/// Sink that discards everything and never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    #[inline]
    fn write(&self, _output: &Output) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Returns a shared [`NullSink`].
#[must_use]
pub fn null_sink() -> SharedSink {
    Arc::new(NullSink)
}

/// Sparse per-level sink overrides stored in a fixed table indexed by level.
///
/// Levels without an entry resolve to the logger's default sink at lookup
/// time, so the table never needs to be rewritten when the default changes.
#[derive(Clone, Default)]
pub struct LevelMap {
    slots: [Option<SharedSink>; Level::COUNT],
}

impl LevelMap {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the override for `level`, if any.
    #[must_use]
    pub fn get(&self, level: Level) -> Option<&SharedSink> {
        self.slots[level.index()].as_ref()
    }

    /// Installs or clears the override for `level`, returning the previous entry.
    pub fn set(&mut self, level: Level, sink: Option<SharedSink>) -> Option<SharedSink> {
        std::mem::replace(&mut self.slots[level.index()], sink)
    }

    /// Installs an override for `level`.
    pub fn insert(&mut self, level: Level, sink: SharedSink) -> Option<SharedSink> {
        self.set(level, Some(sink))
    }

    /// Clears the override for `level`.
    pub fn remove(&mut self, level: Level) -> Option<SharedSink> {
        self.set(level, None)
    }

    /// Reports whether `level` has an override.
    #[must_use]
    pub fn contains(&self, level: Level) -> bool {
        self.slots[level.index()].is_some()
    }

    /// Number of levels with an override.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Reports whether no level has an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over the levels that have an override, in scale order.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL
            .into_iter()
            .filter(|level| self.contains(*level))
    }

    /// Resolves the sink for `level`, falling back to `default`.
    #[must_use]
    pub fn resolve(&self, level: Level, default: &SharedSink) -> SharedSink {
        Arc::clone(self.get(level).unwrap_or(default))
    }
}

impl fmt::Debug for LevelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.levels()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_everything() {
        assert!(NullSink.write(&Output::from("dropped")).is_ok());
    }

    #[test]
    fn level_map_set_and_clear() {
        let mut map = LevelMap::new();
        assert!(map.is_empty());

        assert!(map.insert(Level::Error, null_sink()).is_none());
        assert!(map.contains(Level::Error));
        assert_eq!(map.len(), 1);

        assert!(map.remove(Level::Error).is_some());
        assert!(!map.contains(Level::Error));
        assert!(map.is_empty());
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let default = null_sink();
        let error_sink = null_sink();
        let mut map = LevelMap::new();
        map.insert(Level::Error, Arc::clone(&error_sink));

        assert!(Arc::ptr_eq(&map.resolve(Level::Error, &default), &error_sink));
        assert!(Arc::ptr_eq(&map.resolve(Level::Info, &default), &default));
    }

    #[test]
    fn debug_lists_mapped_levels() {
        let mut map = LevelMap::new();
        map.insert(Level::Warn, null_sink());
        map.insert(Level::Fatal, null_sink());
        assert_eq!(format!("{map:?}"), "{Fatal, Warn}");
    }
}
