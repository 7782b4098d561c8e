//! crates/logging/src/format/mod.rs
//! Formatter contract and reference formatters.
//!
//! A formatter turns a [`LogRecord`] into sink-ready [`Output`]. Formatters
//! are pure with respect to the logger: they may fail, and a failure is handed
//! back to the caller of `log()` unchanged, but they never touch logger state.

mod json;
mod plain;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;
use time::UtcOffset;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::error::PluginError;
use crate::record::LogRecord;

pub use json::JsonFormatter;
pub use plain::PlainFormatter;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Value produced by a formatter and consumed by a sink.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    /// Rendered text, without a trailing newline.
    Text(String),
    /// Structured JSON value.
    Json(Value),
    /// The record itself, passed through unchanged.
    Record(LogRecord),
}

impl Output {
    /// Borrows the text of an [`Output::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrows the value of an [`Output::Json`].
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the record of an [`Output::Record`].
    #[must_use]
    pub const fn as_record(&self) -> Option<&LogRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Output {
    /// Text verbatim, JSON compact, records as a plain line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
            Self::Record(record) => f.write_str(&plain::render_line(record, true)),
        }
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Turns a record into sink-ready output.
///
/// Implemented for every `Fn(&LogRecord) -> Result<Output, PluginError>`
/// closure, so ad-hoc formatters need no named type.
pub trait Formatter: Send + Sync {
    /// Formats one record.
    fn format(&self, record: &LogRecord) -> Result<Output, PluginError>;
}

impl<F> Formatter for F
where
    F: Fn(&LogRecord) -> Result<Output, PluginError> + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> Result<Output, PluginError> {
        self(record)
    }
}

/// Shared handle to a formatter.
pub type SharedFormatter = Arc<dyn Formatter>;

/// Wraps a closure as a [`SharedFormatter`], fixing its signature for inference.
pub fn from_fn<F>(formatter: F) -> SharedFormatter
where
    F: Fn(&LogRecord) -> Result<Output, PluginError> + Send + Sync + 'static,
{
    Arc::new(formatter)
}

/// Identity formatter: hands the record itself to the sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordFormatter;

impl Formatter for RecordFormatter {
    fn format(&self, record: &LogRecord) -> Result<Output, PluginError> {
        Ok(Output::Record(record.clone()))
    }
}

/// Renders a timestamp as UTC RFC 3339 with millisecond precision.
#[must_use]
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(UtcOffset::UTC);
    utc.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}
