/// A value stored in a rendering context.
///
/// Template variables, placeholder substitutions and `as VAR` bindings all
/// flow through `Value`. `Safe` marks text that is already valid markup and
/// must not be escaped again when autoescaping is on.
///
/// # Example
///
/// ```
/// use transtag::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Sam".into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.as_string(), Some("Sam"));
/// assert_eq!(Value::Null.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value. Renders as empty text.
    Null,

    /// A boolean flag.
    Bool(bool),

    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// Plain text, escaped on output when autoescaping is on.
    String(String),

    /// Pre-escaped markup, never escaped again.
    Safe(String),
}

impl Value {
    /// Wrap already escaped markup.
    pub fn safe(text: impl Into<String>) -> Self {
        Value::Safe(text.into())
    }

    /// Get this value as text, if it is a string (plain or safe).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Safe(s) => Some(s),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Float(_) => None,
        }
    }

    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this value is exempt from autoescaping.
    pub fn is_safe(&self) -> bool {
        matches!(self, Value::Safe(_))
    }

    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) | Value::Safe(s) => write!(f, "{s}"),
        }
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
