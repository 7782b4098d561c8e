use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use logging::{Output, PluginError, SharedSink, Sink};

/// Sink that keeps every output in memory.
///
/// Clones share the same storage, so one handle can be installed in a logger
/// while another is kept for inspection.
///
/// # Examples
///
/// ```
/// use logging::{JsonFormatter, Level, Logger, LoggerConfig, args};
/// use logging_sink::BufferSink;
/// use serde_json::{Value, json};
/// use std::sync::Arc;
///
/// let buffer = BufferSink::new();
/// let logger = Logger::new(
///     LoggerConfig::new()
///         .with_default_sink(buffer.shared())
///         .with_formatter(Arc::new(JsonFormatter::new())),
/// );
/// logger.info(args!["x", json!({"a": 1})]).unwrap();
///
/// let last = buffer.last_output().unwrap().to_string();
/// let parsed: Value = serde_json::from_str(&last).unwrap();
/// assert_eq!(parsed["message"], "x");
/// assert_eq!(parsed["args"], json!([{"a": 1}]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    outputs: Arc<Mutex<Vec<Output>>>,
}

impl BufferSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle writing into this buffer.
    #[must_use]
    pub fn shared(&self) -> SharedSink {
        Arc::new(self.clone())
    }

    /// Returns a copy of every output in arrival order.
    #[must_use]
    pub fn outputs(&self) -> Vec<Output> {
        self.lock().clone()
    }

    /// Returns the outputs rendered as text.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the most recent output.
    #[must_use]
    pub fn last_output(&self) -> Option<Output> {
        self.lock().last().cloned()
    }

    /// Number of stored outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards every stored output.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Removes and returns every stored output.
    pub fn drain(&self) -> Vec<Output> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Output>> {
        self.outputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for BufferSink {
    fn write(&self, output: &Output) -> Result<(), PluginError> {
        self.lock().push(output.clone());
        Ok(())
    }
}
