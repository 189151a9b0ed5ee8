//! Dynamic configuration values and heuristic interpretation of override
//! text.
//!
//! Override files carry untyped text, so this module provides a small
//! self-describing [`Value`] enum plus [`Value::interpret`], which turns a
//! textual token into its best-guess typed form. Interpretation is pure and
//! total: it never fails, and in the worst case the token survives as a
//! string.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid integer pattern"));
static FLOAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+\.\d+$").expect("valid float pattern"));
static TRUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(yes|on|true)$").expect("valid true-word pattern"));
static FALSE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(no|off|false)$").expect("valid false-word pattern"));

/// A dynamically typed configuration value.
///
/// Covers the full output domain of the interpreter: JSON-like structures,
/// integers, floats, booleans, strings, and the absent value.
///
/// # Examples
///
/// ```
/// use flexconf::Value;
///
/// let port = Value::Int(8080);
/// assert_eq!(port.as_int(), Some(8080));
/// assert!(port.is_int());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A plain string.
    Str(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A string-keyed mapping of values.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Heuristically decode a textual token into its best-guess typed form.
    ///
    /// Precedence, first match wins:
    ///
    /// 1. A structured literal (JSON array or object) decodes to
    ///    [`Value::Array`] / [`Value::Object`]. Bare JSON scalars do not
    ///    short-circuit here, so the anchored patterns below keep authority
    ///    over tokens like `1e5`.
    /// 2. `^-?\d+$` decodes to [`Value::Int`]. Tokens that overflow `i64`
    ///    fall through and survive as strings.
    /// 3. `^-?\d+\.\d+$` decodes to [`Value::Float`].
    /// 4. `yes`/`on`/`true` (case-insensitive) decode to `Bool(true)`.
    /// 5. `no`/`off`/`false` (case-insensitive) decode to `Bool(false)`.
    /// 6. Anything else survives as [`Value::Str`], unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexconf::Value;
    ///
    /// assert_eq!(Value::interpret("42"), Value::Int(42));
    /// assert_eq!(Value::interpret("1.5"), Value::Float(1.5));
    /// assert_eq!(Value::interpret("ON"), Value::Bool(true));
    /// assert_eq!(Value::interpret("hello"), Value::Str("hello".into()));
    /// ```
    #[must_use]
    pub fn interpret(text: &str) -> Self {
        if let Ok(decoded) = serde_json::from_str::<serde_json::Value>(text) {
            if decoded.is_array() || decoded.is_object() {
                return decoded.into();
            }
        }
        if INT_PATTERN.is_match(text) {
            if let Ok(parsed) = text.parse::<i64>() {
                return Self::Int(parsed);
            }
        }
        if FLOAT_PATTERN.is_match(text) {
            if let Ok(parsed) = text.parse::<f64>() {
                return Self::Float(parsed);
            }
        }
        if TRUE_PATTERN.is_match(text) {
            return Self::Bool(true);
        }
        if FALSE_PATTERN.is_match(text) {
            return Self::Bool(false);
        }
        Self::Str(text.to_string())
    }

    /// Route a string value through [`Value::interpret`]; pass every other
    /// value (including [`Value::Null`]) through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexconf::Value;
    ///
    /// assert_eq!(Value::Str("42".into()).interpreted(), Value::Int(42));
    /// assert_eq!(Value::Null.interpreted(), Value::Null);
    /// assert_eq!(Value::Bool(true).interpreted(), Value::Bool(true));
    /// ```
    #[must_use]
    pub fn interpreted(self) -> Self {
        match self {
            Self::Str(text) => Self::interpret(&text),
            other => other,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if this is an integer.
    ///
    /// Usable directly as a validation predicate:
    ///
    /// ```
    /// use flexconf::{ConfigValue, Value};
    ///
    /// let value = ConfigValue::builder("num_apples", 0i64)
    ///     .validator(Value::is_int)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(value.example(), &Value::Int(0));
    /// ```
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns `true` if this is a floating-point number.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns `true` if this is a string.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns the boolean if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a floating-point number.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            structured @ (Self::Array(_) | Self::Object(_)) => {
                let rendered = serde_json::to_string(structured).map_err(|_| fmt::Error)?;
                write!(f, "{rendered}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || Self::Float(n.as_f64().unwrap_or(f64::NAN)),
                Self::Int,
            ),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(n) => Self::Number(n.into()),
            Value::Float(x) => {
                serde_json::Number::from_f64(x).map_or(Self::Null, Self::Number)
            }
            Value::Str(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}
