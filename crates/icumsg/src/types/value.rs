use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// A runtime value bound to a message parameter.
///
/// Formatters match on the variant; a variant a formatter cannot handle
/// renders as empty output rather than failing.
///
/// # Example
///
/// ```
/// use icumsg::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let flag: Value = true.into();
///
/// assert_eq!(count.as_integer(), Some(42));
/// assert_eq!(name.as_str(), Some("Alice"));
/// assert_eq!(flag.to_string(), "true");
/// ```
#[derive(Clone)]
pub enum Value {
    /// A string value.
    String(String),

    /// An integer (used for plural selection).
    Integer(i64),

    /// A floating-point number.
    Float(f64),

    /// A boolean. Renders as `true` / `false`, which select cases can match.
    Boolean(bool),

    /// A point in time, rendered by `date` arguments.
    Timestamp(DateTime<FixedOffset>),

    /// Any other displayable value. Only its string form is visible to
    /// templates.
    Opaque(Arc<dyn Display + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary displayable value.
    pub fn opaque(value: impl Display + Send + Sync + 'static) -> Self {
        Value::Opaque(Arc::new(value))
    }

    /// Get this value as an integer, if it has an exact integer reading.
    ///
    /// Floats qualify when they have no fractional part, strings when they
    /// parse as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true for integer and float values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

/// The default string form used by placeholders, `#` and select.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Opaque(v) => write!(f, "{v}"),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Timestamp(t) => f.debug_tuple("Timestamp").field(t).finish(),
            Value::Opaque(v) => f.debug_tuple("Opaque").field(&v.to_string()).finish(),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t.fixed_offset())
    }
}
