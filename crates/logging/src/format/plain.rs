//! Human-readable single-line formatter.

use std::fmt::Write as _;

use super::{Formatter, Output, format_timestamp};
use crate::error::PluginError;
use crate::record::LogRecord;

/// Renders `<timestamp> [<LEVEL>] <message> <arg> <arg>...`.
///
/// Structured arguments are rendered as compact JSON and primitives verbatim,
/// each preceded by one space. The timestamp column can be dropped for
/// deterministic output.
///
/// # Examples
///
/// ```
/// use logging::{Formatter, Level, LogRecord, PlainFormatter, Arg};
/// use serde_json::json;
/// use time::OffsetDateTime;
///
/// let record = LogRecord::new(
///     Level::Warn,
///     "disk at ",
///     vec![Arg::from(json!({"pct": 91}))],
///     OffsetDateTime::UNIX_EPOCH,
/// );
/// let output = PlainFormatter::without_timestamps().format(&record).unwrap();
/// assert_eq!(output.as_text(), Some("[WARN] disk at  {\"pct\":91}"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PlainFormatter {
    timestamps: bool,
}

impl PlainFormatter {
    /// Creates a formatter that prefixes every line with the record timestamp.
    #[must_use]
    pub const fn new() -> Self {
        Self { timestamps: true }
    }

    /// Creates a formatter that omits the timestamp column.
    #[must_use]
    pub const fn without_timestamps() -> Self {
        Self { timestamps: false }
    }

    /// Reports whether the timestamp column is rendered.
    #[must_use]
    pub const fn timestamps(&self) -> bool {
        self.timestamps
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PlainFormatter {
    fn format(&self, record: &LogRecord) -> Result<Output, PluginError> {
        Ok(Output::Text(render_line(record, self.timestamps)))
    }
}

pub(super) fn render_line(record: &LogRecord, timestamps: bool) -> String {
    let mut line = String::with_capacity(record.message.len() + 40);
    if timestamps {
        line.push_str(&format_timestamp(record.timestamp));
        line.push(' ');
    }
    let _ = write!(line, "[{}]", record.level);
    if !record.message.is_empty() {
        line.push(' ');
        line.push_str(&record.message);
    }
    for arg in &record.args {
        let _ = write!(line, " {arg}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Level;
    use crate::record::Arg;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn renders_timestamp_level_and_message() {
        let record = LogRecord::new(
            Level::Error,
            "socket closed",
            Vec::new(),
            datetime!(2025-01-15 10:30:00 UTC),
        );
        let output = PlainFormatter::new().format(&record).unwrap();
        assert_eq!(
            output.as_text(),
            Some("2025-01-15T10:30:00.000Z [ERROR] socket closed")
        );
    }

    #[test]
    fn empty_message_does_not_leave_double_space() {
        let record = LogRecord::new(
            Level::Debug,
            "",
            vec![Arg::from(json!([1, 2]))],
            datetime!(2025-01-15 10:30:00 UTC),
        );
        let output = PlainFormatter::without_timestamps().format(&record).unwrap();
        assert_eq!(output.as_text(), Some("[DEBUG] [1,2]"));
    }

    #[test]
    fn trailing_primitives_follow_structured_args() {
        let record = LogRecord::new(
            Level::Info,
            "user:",
            vec![Arg::from(json!({"name": "x"})), Arg::from("done")],
            datetime!(2025-01-15 10:30:00 UTC),
        );
        let output = PlainFormatter::without_timestamps().format(&record).unwrap();
        assert_eq!(output.as_text(), Some("[INFO] user: {\"name\":\"x\"} done"));
    }
}
