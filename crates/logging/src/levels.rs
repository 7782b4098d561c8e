//! crates/logging/src/levels.rs
//! Severity scale and the level filter rule.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LoggingError;

/// Ordered severity scale.
///
/// Smaller values are more severe. [`Level::Off`] suppresses everything when
/// used as a threshold and is never emitted when used as a call level, while
/// [`Level::Trace`] is the most verbose setting. The discriminants are the
/// numeric values exchanged with configuration loaders.
///
/// # Examples
///
/// ```
/// use logging::Level;
///
/// assert!(Level::Error.is_enabled(Level::Warn));
/// assert!(!Level::Info.is_enabled(Level::Warn));
/// assert!(!Level::Fatal.is_enabled(Level::Off));
/// assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Suppresses all output.
    Off = 0,
    /// Unrecoverable failures.
    Fatal = 1,
    /// Errors the application can report but not fix.
    Error = 2,
    /// Suspicious conditions.
    Warn = 3,
    /// Normal operational messages; the default threshold.
    #[default]
    Info = 4,
    /// Diagnostic detail.
    Debug = 5,
    /// Most verbose output.
    Trace = 6,
}

impl Level {
    /// Number of levels on the scale, [`Level::Off`] included.
    pub const COUNT: usize = 7;

    /// Every level ordered from [`Level::Off`] to [`Level::Trace`].
    pub const ALL: [Self; Self::COUNT] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Returns the numeric value of the level.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the slot index used by fixed-size per-level tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a numeric value into a level, returning `None` outside `0..=6`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Fatal),
            2 => Some(Self::Error),
            3 => Some(Self::Warn),
            4 => Some(Self::Info),
            5 => Some(Self::Debug),
            6 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Returns the upper-case name used by formatters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Reports whether a call at `self` passes a logger whose threshold is `threshold`.
    ///
    /// A call is emitted iff neither value is [`Level::Off`] and the call level
    /// is not more verbose than the threshold.
    #[inline(always)]
    #[must_use]
    pub const fn is_enabled(self, threshold: Self) -> bool {
        is_enabled(self, threshold)
    }
}

/// Free-function form of [`Level::is_enabled`].
#[inline(always)]
#[must_use]
pub const fn is_enabled(level: Level, threshold: Level) -> bool {
    let level = level as u8;
    let threshold = threshold as u8;
    level != 0 && threshold != 0 && level <= threshold
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Level {
    type Error = LoggingError;

    fn try_from(value: u8) -> Result<Self, LoggingError> {
        Self::from_u8(value).ok_or(LoggingError::InvalidLevel(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.as_u8()
    }
}

/// Error returned when parsing a [`Level`] from text fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level {input:?}; expected off, fatal, error, warn, info, debug, trace or 0-6")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a symbolic name (case-insensitive) or a decimal value in `0..=6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rejected = || ParseLevelError {
            input: s.to_owned(),
        };

        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<u8>()
                .ok()
                .and_then(Self::from_u8)
                .ok_or_else(rejected);
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "off" | "none" | "silent" => Ok(Self::Off),
            "fatal" => Ok(Self::Fatal),
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(rejected()),
        }
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for Level {
    /// Accepts either the symbolic name or the numeric value.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match LevelRepr::deserialize(deserializer)? {
            LevelRepr::Number(value) => u8::try_from(value)
                .ok()
                .and_then(Self::from_u8)
                .ok_or_else(|| {
                    de::Error::custom(format!(
                        "log level {value} is outside the supported range 0-6"
                    ))
                }),
            LevelRepr::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}
