//! Tagged attribute values.
//!
//! Attribute tables are loosely typed at the source, so every cell is carried
//! as a [`Value`]. Equality is semantic: an integer and a float holding the
//! same number are equal, and a float NaN counts as null. Grouping and
//! membership checks go through [`ValueKey`], the hashable form of a
//! non-null value.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format used for date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single attribute value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDateTime),
}

/// How text values are compared when grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextMatching {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

/// Hashable identity of a non-null value.
///
/// Integral floats collapse onto `Integer` so that `1` and `1.0` share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKey {
    Text(String),
    Integer(i64),
    Float(u64),
    Date(NaiveDateTime),
}

impl Value {
    /// True for `Null` and for float NaN.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Case-sensitive key of the value, `None` when null.
    pub fn key(&self) -> Option<ValueKey> {
        self.key_with(TextMatching::CaseSensitive)
    }

    /// Key of the value under the given text matching mode.
    pub fn key_with(&self, matching: TextMatching) -> Option<ValueKey> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(ValueKey::Text(match matching {
                TextMatching::CaseSensitive => text.clone(),
                TextMatching::CaseInsensitive => text.to_lowercase(),
            })),
            Value::Integer(value) => Some(ValueKey::Integer(*value)),
            Value::Float(value) => float_key(*value),
            Value::Date(value) => Some(ValueKey::Date(*value)),
        }
    }

    /// Rendering used inside notes: text is single-quoted, everything else bare.
    pub fn quoted(&self) -> String {
        match self {
            Value::Text(text) => format!("'{text}'"),
            other => other.to_string(),
        }
    }
}

fn float_key(value: f64) -> Option<ValueKey> {
    if value.is_nan() {
        return None;
    }
    // 2^63 is exactly representable, so `<` keeps the cast in range.
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        return Some(ValueKey::Integer(value as i64));
    }
    Some(ValueKey::Float(value.to_bits()))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(text) => f.write_str(text),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) if value.is_nan() => Ok(()),
            Value::Float(value) => write!(f, "{value}"),
            Value::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
