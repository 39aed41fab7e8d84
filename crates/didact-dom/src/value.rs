//! Primitive property values.
//!
//! Element properties and primitive children carry one of the five primitive
//! values an element literal can hold. Their string forms follow the
//! ECMAScript `ToString` rules so that a number child renders the same text a
//! browser host would show.

use std::fmt;

use serde::{Serialize, Serializer};

/// A primitive value: a property value or a primitive child.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Undefined,
    /// The explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A string.
    String(String),
}

impl Value {
    /// The data a host text node stores when this value is assigned to its
    /// `nodeValue`.
    ///
    /// [§ 4.4 nodeValue](https://dom.spec.whatwg.org/#dom-node-nodevalue)
    /// "The nodeValue setter steps are to, if the given value is null, act as
    /// if it was the empty string instead."
    ///
    /// `nodeValue` is a nullable `DOMString?`, so `undefined` converts to
    /// null first and also yields the empty string.
    #[must_use]
    pub fn to_text_data(&self) -> String {
        match self {
            Self::Null | Self::Undefined => String::new(),
            other => other.to_string(),
        }
    }

    /// Returns the string slice if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for values an HTML serializer treats as "attribute absent".
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null | Self::Bool(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// [§ 6.1.6.1.20 Number::toString](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Covers the cases element literals produce in practice: integral values
/// print without a fraction, non-finite values use their ECMAScript names,
/// and negative zero prints as `0`.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[expect(
        clippy::cast_precision_loss,
        reason = "element literal numbers are doubles; magnitudes above 2^53 round like they would in a script host"
    )]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
