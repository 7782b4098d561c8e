//! crates/logging/src/record.rs
//! Call arguments and the normalised record handed to formatters.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};
use time::OffsetDateTime;

use crate::levels::Level;

/// Marker substituted for values that cannot be represented as JSON.
pub const UNSERIALIZABLE_MARKER: &str = "[unserializable]";

/// A single argument of a logging call, classified at the call boundary.
///
/// Strings, numbers and booleans are primitives and can be merged into the
/// record's message. Everything else is [`Arg::Structured`] and is kept
/// verbatim in the record's argument list. Conversions from
/// [`serde_json::Value`] classify JSON strings, numbers and booleans as the
/// matching primitive; objects, arrays and `null` stay structured.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// Text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Object, array, `null` or any other non-primitive value.
    Structured(Value),
}

impl Arg {
    /// Converts any serialisable value into an argument.
    ///
    /// Serialisation failures never propagate: the argument degrades to the
    /// [`UNSERIALIZABLE_MARKER`] string so the logging call itself still succeeds.
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => Self::from(value),
            Err(_) => Self::Structured(Value::String(UNSERIALIZABLE_MARKER.to_owned())),
        }
    }

    /// Reports whether the argument can be merged into a message.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Structured(_))
    }

    /// Returns the JSON representation of the argument.
    ///
    /// Non-finite floats have no JSON form and map to `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(text) => Value::String(text.clone()),
            Self::Int(value) => Value::Number((*value).into()),
            Self::Uint(value) => Value::Number((*value).into()),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Bool(value) => Value::Bool(*value),
            Self::Structured(value) => value.clone(),
        }
    }

    pub(crate) fn append_to(&self, message: &mut String) {
        match self {
            Self::Str(text) => message.push_str(text),
            other => {
                let _ = write!(message, "{other}");
            }
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Arg {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Str(text),
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Self::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Self::Uint(value)
                } else {
                    number
                        .as_f64()
                        .map_or(Self::Structured(Value::Number(number)), Self::Float)
                }
            }
            structured => Self::Structured(structured),
        }
    }
}

impl From<&Value> for Arg {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<&String> for Arg {
    fn from(text: &String) -> Self {
        Self::Str(text.clone())
    }
}

impl From<Cow<'_, str>> for Arg {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Str(text.into_owned())
    }
}

impl From<char> for Arg {
    fn from(ch: char) -> Self {
        Self::Str(ch.to_string())
    }
}

impl From<bool> for Arg {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::Uint(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Normalised unit passed to formatters; exactly one is built per emitted call.
///
/// `message` holds the concatenation of the leading primitive arguments and
/// `args` every argument from the first structured one onward, in call order.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    /// Severity of the call.
    pub level: Level,
    /// Concatenated leading primitives.
    pub message: String,
    /// Remaining arguments, unchanged.
    pub args: Vec<Arg>,
    /// Call time, or the timestamp supplied as the first argument.
    pub timestamp: OffsetDateTime,
}

impl LogRecord {
    /// Creates a record with an explicit timestamp.
    #[must_use]
    pub fn new(
        level: Level,
        message: impl Into<String>,
        args: Vec<Arg>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            args,
            timestamp,
        }
    }

    /// Returns the arguments as JSON values.
    #[must_use]
    pub fn args_json(&self) -> Vec<Value> {
        self.args.iter().map(Arg::to_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_primitives_classify_as_primitives() {
        assert_eq!(Arg::from(json!("x")), Arg::Str("x".to_owned()));
        assert_eq!(Arg::from(json!(true)), Arg::Bool(true));
        assert_eq!(Arg::from(json!(-3)), Arg::Int(-3));
        assert_eq!(Arg::from(json!(u64::MAX)), Arg::Uint(u64::MAX));
        assert_eq!(Arg::from(json!(1.5)), Arg::Float(1.5));
    }

    #[test]
    fn json_containers_and_null_stay_structured() {
        assert!(!Arg::from(json!({"a": 1})).is_primitive());
        assert!(!Arg::from(json!([1, 2])).is_primitive());
        assert!(!Arg::from(Value::Null).is_primitive());
    }

    #[test]
    fn from_serialize_converts_serde_types() {
        #[derive(serde::Serialize)]
        struct User {
            name: &'static str,
        }

        let arg = Arg::from_serialize(&User { name: "x" });
        assert_eq!(arg, Arg::Structured(json!({"name": "x"})));
    }

    #[test]
    fn from_serialize_failure_degrades_to_marker() {
        use std::collections::HashMap;

        // Maps with non-string keys cannot become JSON objects.
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        let arg = Arg::from_serialize(&map);
        assert_eq!(
            arg,
            Arg::Structured(Value::String(UNSERIALIZABLE_MARKER.to_owned()))
        );
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(Arg::Float(f64::NAN).to_json(), Value::Null);
        assert_eq!(Arg::Float(f64::INFINITY).to_json(), Value::Null);
        assert_eq!(Arg::Float(0.25).to_json(), json!(0.25));
    }

    #[test]
    fn display_renders_primitives_without_quotes() {
        assert_eq!(Arg::from("id=").to_string(), "id=");
        assert_eq!(Arg::from(42u32).to_string(), "42");
        assert_eq!(Arg::from(false).to_string(), "false");
        assert_eq!(Arg::from(json!({"a": 1})).to_string(), "{\"a\":1}");
    }
}
