//! crates/logging/src/builder.rs
//! Normalises call arguments into a [`LogRecord`].

use time::format_description::FormatItem;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::levels::Level;
use crate::record::{Arg, LogRecord};

const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME_SPACE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_TIME_SPACE_FRACTION: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
const DATE_TIME_LOCAL: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_TIME_LOCAL_FRACTION: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const DATE_TIME_MINUTE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const DATE_TIME_MINUTE_ZULU: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]Z");
const DATE_TIME_MINUTE_OFFSET: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
);
const DATE_TIME_MINUTE_OFFSET_COMPACT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory][offset_minute]"
);
const DATE_TIME_OFFSET_COMPACT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
);
const DATE_TIME_FRACTION_OFFSET_COMPACT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
);

/// Builds [`LogRecord`] values from raw call arguments.
///
/// The algorithm:
///
/// 1. When the first argument is a string that reads as a date/time, it is
///    consumed as the record's timestamp; otherwise the current time is used.
/// 2. Leading primitive arguments are concatenated into `message` with no
///    separator added.
/// 3. From the first structured argument onward, every argument (primitive or
///    not) is kept unchanged in `args`.
///
/// Building never fails: empty input yields an empty message and no args.
///
/// # Examples
///
/// ```
/// use logging::{Level, MessageBuilder, args};
/// use serde_json::json;
///
/// let record = MessageBuilder::build(Level::Trace, args!["user:", json!({"name": "x"})]);
/// assert_eq!(record.message, "user:");
/// assert_eq!(record.args.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a record stamped with the current UTC time unless the first
    /// argument supplies one.
    #[must_use]
    pub fn build(level: Level, raw: Vec<Arg>) -> LogRecord {
        Self::build_at(level, raw, OffsetDateTime::now_utc())
    }

    /// Builds a record using `now` as the fallback timestamp.
    #[must_use]
    pub fn build_at(level: Level, raw: Vec<Arg>, now: OffsetDateTime) -> LogRecord {
        let mut raw = raw.into_iter().peekable();

        let timestamp = match raw.peek() {
            Some(Arg::Str(candidate)) => match parse_timestamp(candidate) {
                Some(parsed) => {
                    raw.next();
                    parsed
                }
                None => now,
            },
            _ => now,
        };

        let mut message = String::new();
        let mut args = Vec::new();

        for arg in raw.by_ref() {
            if arg.is_primitive() {
                arg.append_to(&mut message);
            } else {
                args.push(arg);
                break;
            }
        }
        args.extend(raw);

        LogRecord {
            level,
            message,
            args,
            timestamp,
        }
    }
}

/// Attempts to read `candidate` as an unambiguous date/time.
///
/// Accepted forms are RFC 3339, RFC 2822, `YYYY-MM-DD`,
/// `YYYY-MM-DD[ T]HH:MM:SS[.fff]`, minute precision `YYYY-MM-DDTHH:MM`, and
/// offsets written as `Z`, `+HH:MM` or `+HHMM`. Forms without an offset are
/// read as UTC. Anything that parses as a plain number is rejected.
#[must_use]
pub fn parse_timestamp(candidate: &str) -> Option<OffsetDateTime> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.parse::<f64>().is_ok() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(candidate, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = OffsetDateTime::parse(candidate, &Rfc2822) {
        return Some(parsed);
    }

    for format in [
        DATE_TIME_FRACTION_OFFSET_COMPACT,
        DATE_TIME_OFFSET_COMPACT,
        DATE_TIME_MINUTE_OFFSET,
        DATE_TIME_MINUTE_OFFSET_COMPACT,
    ] {
        if let Ok(parsed) = OffsetDateTime::parse(candidate, format) {
            return Some(parsed);
        }
    }

    for format in [
        DATE_TIME_LOCAL_FRACTION,
        DATE_TIME_LOCAL,
        DATE_TIME_MINUTE_ZULU,
        DATE_TIME_MINUTE,
        DATE_TIME_SPACE_FRACTION,
        DATE_TIME_SPACE,
    ] {
        if let Ok(parsed) = PrimitiveDateTime::parse(candidate, format) {
            return Some(parsed.assume_utc());
        }
    }

    Date::parse(candidate, DATE_ONLY)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
