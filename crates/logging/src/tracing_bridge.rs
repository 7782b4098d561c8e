//! crates/logging/src/tracing_bridge.rs
//! Forwards `tracing` events into a [`Logger`].
//!
//! Applications that instrument with `tracing` can route those events through
//! the same formatter and per-level sinks as direct logging calls.
//!
//! - `ERROR`, `WARN`, `INFO`, `DEBUG` and `TRACE` map to the levels of the
//!   same name; `FATAL` has no `tracing` counterpart.
//! - The `message` field becomes the first argument and every other field is
//!   collected into one structured `{name: value}` argument.
//! - Events under the `logging::` targets are the engine's own diagnostics and
//!   are never forwarded.
//!
//! ```rust,ignore
//! use logging::{Logger, LoggerConfig, init_tracing_bridge};
//! use std::sync::Arc;
//!
//! init_tracing_bridge(Arc::new(Logger::new(LoggerConfig::new())));
//! tracing::warn!(path = "/tmp", "disk almost full");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::levels::Level;
use crate::logger::Logger;
use crate::record::Arg;

const ENGINE_TARGET_PREFIX: &str = "logging::";

/// A tracing layer that feeds events into a [`Logger`].
///
/// Logger failures are dropped: a layer has no caller to report them to.
#[derive(Clone, Debug)]
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    /// Creates a layer forwarding into `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Returns the target logger.
    #[must_use]
    pub const fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Map a tracing level to a log level.
    const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Trace,
        }
    }

    fn is_engine_target(target: &str) -> bool {
        target == "logging" || target.starts_with(ENGINE_TARGET_PREFIX)
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_engine_target(metadata.target()) {
            return;
        }

        let level = Self::map_level(metadata.level());
        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let _ = self.logger.log(level, visitor.into_args());
    }
}

/// Visitor splitting the message from the remaining fields.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_owned(), value);
    }

    fn into_args(self) -> Vec<Arg> {
        let mut args = vec![Arg::Str(self.message.unwrap_or_default())];
        if !self.fields.is_empty() {
            args.push(Arg::Structured(Value::Object(self.fields)));
        }
        args
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.insert(field, Value::String(format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.insert(field, Value::String(value.to_owned()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Arg::Float(value).to_json());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }
}

/// Installs a global subscriber that forwards every event into `logger`.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing_bridge(logger: Arc<Logger>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .init();
}

/// Installs a global subscriber combining `filter` with the bridge.
///
/// ```rust,ignore
/// use logging::{Logger, init_tracing_bridge_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_bridge_with_filter(Arc::new(Logger::default()), EnvFilter::from_default_env());
/// ```
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing_bridge_with_filter<F>(logger: Arc<Logger>, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .init();
}
