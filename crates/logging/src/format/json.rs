//! Structured JSON formatter.

use serde_json::{Map, Value};

use super::{Formatter, Output, format_timestamp};
use crate::error::PluginError;
use crate::record::LogRecord;

/// Serialises records as `{"timestamp", "level", "message", "args"}` objects.
///
/// The formatter is JSON-safe: arguments are already JSON trees (values that
/// could not be serialised were replaced by a marker when the argument was
/// built, and non-finite floats become `null`), so formatting never fails on
/// the data it is given. By default the object is rendered to a compact
/// string; [`JsonFormatter::structured`] hands the [`Value`] to the sink
/// instead.
///
/// # Examples
///
/// ```
/// use logging::{Formatter, JsonFormatter, Level, MessageBuilder, args};
/// use serde_json::{Value, json};
///
/// let record = MessageBuilder::build(Level::Info, args!["x", json!({"a": 1})]);
/// let output = JsonFormatter::new().format(&record).unwrap();
/// let parsed: Value = serde_json::from_str(output.as_text().unwrap()).unwrap();
/// assert_eq!(parsed["level"], "INFO");
/// assert_eq!(parsed["args"], json!([{"a": 1}]));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter {
    structured: bool,
}

impl JsonFormatter {
    /// Creates a formatter producing [`Output::Text`].
    #[must_use]
    pub const fn new() -> Self {
        Self { structured: false }
    }

    /// Creates a formatter producing [`Output::Json`].
    #[must_use]
    pub const fn structured() -> Self {
        Self { structured: true }
    }

    /// Builds the JSON object for `record`.
    #[must_use]
    pub fn to_value(record: &LogRecord) -> Value {
        let mut object = Map::with_capacity(4);
        object.insert(
            "timestamp".to_owned(),
            Value::String(format_timestamp(record.timestamp)),
        );
        object.insert(
            "level".to_owned(),
            Value::String(record.level.name().to_owned()),
        );
        object.insert("message".to_owned(), Value::String(record.message.clone()));
        object.insert("args".to_owned(), Value::Array(record.args_json()));
        Value::Object(object)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<Output, PluginError> {
        let value = Self::to_value(record);
        if self.structured {
            Ok(Output::Json(value))
        } else {
            Ok(Output::Text(serde_json::to_string(&value)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;
    use crate::record::{Arg, UNSERIALIZABLE_MARKER};
    use serde_json::json;
    use time::macros::datetime;

    fn record(args: Vec<Arg>) -> LogRecord {
        LogRecord::new(Level::Warn, "disk", args, datetime!(2025-01-15 10:30:00 UTC))
    }

    #[test]
    fn text_output_parses_back_to_the_record_fields() {
        let output = JsonFormatter::new()
            .format(&record(vec![Arg::from(json!({"pct": 91}))]))
            .unwrap();
        let parsed: Value = serde_json::from_str(output.as_text().unwrap()).unwrap();
        assert_eq!(
            parsed,
            json!({
                "timestamp": "2025-01-15T10:30:00.000Z",
                "level": "WARN",
                "message": "disk",
                "args": [{"pct": 91}],
            })
        );
    }

    #[test]
    fn structured_output_keeps_the_value() {
        let output = JsonFormatter::structured().format(&record(Vec::new())).unwrap();
        assert_eq!(output.as_json().unwrap()["args"], json!([]));
    }

    #[test]
    fn non_serialisable_input_does_not_fail() {
        let args = vec![
            Arg::Float(f64::NAN),
            Arg::Structured(Value::String(UNSERIALIZABLE_MARKER.to_owned())),
        ];
        let output = JsonFormatter::new().format(&record(args)).unwrap();
        let parsed: Value = serde_json::from_str(output.as_text().unwrap()).unwrap();
        assert_eq!(parsed["args"], json!([null, UNSERIALIZABLE_MARKER]));
    }
}
