//! crates/logging/src/settings.rs
//! Plain-data settings handed over by configuration loaders.
//!
//! Loaders resolve files and search paths on their own; this module only
//! describes the shape of the logging section and how it maps onto a
//! [`LoggerConfig`]. Output streams are wired by the sink crate, so the core
//! never depends on a console.

use std::env;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;
use crate::format::{JsonFormatter, PlainFormatter, RecordFormatter, SharedFormatter};
use crate::levels::{Level, ParseLevelError};
use crate::sink::SharedSink;

/// Environment variable overriding the configured threshold.
pub const LEVEL_ENV_VAR: &str = "PLUGLOG_LEVEL";

/// Reference formatter selected by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// [`PlainFormatter`] with timestamps.
    #[default]
    Plain,
    /// [`JsonFormatter`] producing JSON text.
    Json,
    /// [`RecordFormatter`] passing records through.
    Record,
}

impl FormatKind {
    /// Instantiates the formatter.
    #[must_use]
    pub fn formatter(self) -> SharedFormatter {
        match self {
            Self::Plain => Arc::new(PlainFormatter::new()),
            Self::Json => Arc::new(JsonFormatter::new()),
            Self::Record => Arc::new(RecordFormatter),
        }
    }
}

/// Logging section of an application configuration.
///
/// Every field is optional in the serialized form.
///
/// # Examples
///
/// ```
/// use logging::{Level, settings::{FormatKind, LoggerSettings}};
///
/// let settings = LoggerSettings::from_json_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
/// assert_eq!(settings.level, Level::Debug);
/// assert_eq!(settings.format, FormatKind::Json);
/// assert!(settings.console);
///
/// let numeric = LoggerSettings::from_json_str(r#"{"level": 2}"#).unwrap();
/// assert_eq!(numeric.level, Level::Error);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    /// Threshold, by name or number.
    pub level: Level,
    /// Formatter.
    pub format: FormatKind,
    /// Whether console sinks should be installed.
    pub console: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: FormatKind::Plain,
            console: true,
        }
    }
}

impl LoggerSettings {
    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] for malformed documents, unknown
    /// fields and out-of-range levels.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overrides the level from [`LEVEL_ENV_VAR`] when it is set.
    ///
    /// # Errors
    ///
    /// [`ParseLevelError`] when the variable holds an unrecognised level; the
    /// settings are left unchanged in that case.
    pub fn apply_env(self) -> Result<Self, ParseLevelError> {
        let value = env::var(LEVEL_ENV_VAR).ok();
        self.apply_level_override(value.as_deref())
    }

    /// Overrides the level from an optional textual value.
    ///
    /// # Errors
    ///
    /// [`ParseLevelError`] when `value` is present but unrecognised.
    pub fn apply_level_override(mut self, value: Option<&str>) -> Result<Self, ParseLevelError> {
        if let Some(value) = value {
            self.level = value.parse()?;
        }
        Ok(self)
    }

    /// Builds a complete configuration around `default_sink`.
    #[must_use]
    pub fn into_config(self, default_sink: SharedSink) -> LoggerConfig {
        LoggerConfig::new()
            .with_level(self.level)
            .with_formatter(self.format.formatter())
            .with_default_sink(default_sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Output;
    use crate::record::LogRecord;
    use crate::sink::null_sink;
    use time::OffsetDateTime;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = LoggerSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, LoggerSettings::default());
        assert_eq!(settings.level, Level::Info);
    }

    #[test]
    fn out_of_range_numeric_level_is_rejected() {
        let err = LoggerSettings::from_json_str(r#"{"level": 9}"#).unwrap_err();
        assert!(err.to_string().contains("outside the supported range"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(LoggerSettings::from_json_str(r#"{"colour": true}"#).is_err());
    }

    #[test]
    fn level_override_accepts_names_and_numbers() {
        let settings = LoggerSettings::default()
            .apply_level_override(Some("TRACE"))
            .unwrap();
        assert_eq!(settings.level, Level::Trace);

        let settings = settings.apply_level_override(Some("1")).unwrap();
        assert_eq!(settings.level, Level::Fatal);

        let settings = settings.apply_level_override(None).unwrap();
        assert_eq!(settings.level, Level::Fatal);
    }

    #[test]
    fn invalid_override_reports_input() {
        let err = LoggerSettings::default()
            .apply_level_override(Some("loud"))
            .unwrap_err();
        assert_eq!(err.input(), "loud");
    }

    #[test]
    fn into_config_selects_formatter() {
        let config = LoggerSettings {
            level: Level::Warn,
            format: FormatKind::Record,
            console: false,
        }
        .into_config(null_sink());

        assert_eq!(config.level(), Level::Warn);
        let record = LogRecord::new(Level::Warn, "x", Vec::new(), OffsetDateTime::UNIX_EPOCH);
        let output = config.formatter().format(&record).unwrap();
        assert_eq!(output, Output::Record(record));
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = LoggerSettings {
            level: Level::Debug,
            format: FormatKind::Json,
            console: false,
        };
        let text = serde_json::to_string(&settings).unwrap();
        assert_eq!(text, r#"{"level":"DEBUG","format":"json","console":false}"#);
        assert_eq!(LoggerSettings::from_json_str(&text).unwrap(), settings);
    }
}
