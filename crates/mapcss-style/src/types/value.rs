//! Dynamic values of `eval()` expressions.
//!
//! # Example
//!
//! ```
//! use mapcss_style::types::Value;
//!
//! assert!(Value::from("").is_none());
//! assert!(Value::from(0.0).is_none());
//! assert!(!Value::from(false).is_none());
//!
//! assert_eq!(Value::from("2.5").as_number(), 2.5);
//! assert!(Value::from("abc").as_number().is_nan());
//! assert!(!Value::from("no").as_boolean());
//! assert!(Value::from(3.0).compare_equal(&Value::from("3")));
//! ```

use std::borrow::Cow;
use std::fmt;

/// A string, number or boolean, or nothing.
///
/// Strings borrow where they can, e.g. from literals of the compiled
/// expression or from element tags. All coercions are total.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value<'a> {
    /// No value.
    #[default]
    None,
    /// Text.
    String(Cow<'a, str>),
    /// A double precision number.
    Number(f64),
    /// A boolean.
    Boolean(bool),
}

impl<'a> Value<'a> {
    /// Check whether this value counts as "none".
    ///
    /// Empty strings, zero and NaN are none. Booleans never are.
    pub fn is_none(&self) -> bool {
        match self {
            Value::None => true,
            Value::String(s) => s.is_empty(),
            Value::Number(n) => *n == 0.0 || n.is_nan(),
            Value::Boolean(_) => false,
        }
    }

    /// Text representation. Numbers use their shortest decimal form.
    pub fn as_string(&self) -> Cow<'_, str> {
        match self {
            Value::None => Cow::Borrowed(""),
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Boolean(true) => Cow::Borrowed("true"),
            Value::Boolean(false) => Cow::Borrowed("false"),
        }
    }

    /// Like [`as_string`](Self::as_string), but strings keep their
    /// original lifetime.
    pub fn into_string(self) -> Cow<'a, str> {
        match self {
            Value::String(s) => s,
            other => Cow::Owned(other.as_string().into_owned()),
        }
    }

    /// Numeric representation, NaN if there is none.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::String(s) => parse_number(s),
            Value::Number(n) => *n,
            Value::None | Value::Boolean(_) => f64::NAN,
        }
    }

    /// Boolean representation.
    ///
    /// The strings `false`, `0`, `no` and the empty string are false.
    pub fn as_boolean(&self) -> bool {
        match self {
            Value::None => false,
            Value::String(s) => !matches!(&**s, "" | "false" | "0" | "no"),
            Value::Number(n) => *n != 0.0,
            Value::Boolean(b) => *b,
        }
    }

    /// Equality as used by `==` in expressions.
    ///
    /// Values of different types compare by their string form.
    pub fn compare_equal(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            _ => self.as_string() == other.as_string(),
        }
    }

    /// Reborrow this value, without copying string contents.
    pub fn borrowed(&self) -> Value<'_> {
        match self {
            Value::None => Value::None,
            Value::String(s) => Value::String(Cow::Borrowed(s)),
            Value::Number(n) => Value::Number(*n),
            Value::Boolean(b) => Value::Boolean(*b),
        }
    }

    /// Detach this value from whatever it borrows.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::None => Value::None,
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Number(n) => Value::Number(n),
            Value::Boolean(b) => Value::Boolean(b),
        }
    }
}

/// Parse decimal text independent of locale. Unparsable or empty text is NaN.
pub(crate) fn parse_number(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::String(s) => crate::writer::write_quoted(f, s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}
