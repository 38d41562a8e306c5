use super::StyledText;

/// A call-time parameter value.
///
/// Parameters are either primitives (numbers, strings) that the engine wraps
/// into synthetic [`StyledText`] instances via formatting and plural
/// classification, or already-instantiated [`StyledText`] values supporting
/// recursive composition (one entry's output passed into another).
///
/// # Example
///
/// ```
/// use weft::{StyledText, Value};
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let nested: Value = StyledText::plain("sword").into();
///
/// assert_eq!(count.as_number(), Some(42));
/// assert_eq!(name.as_str(), Some("Alice"));
/// assert!(nested.as_text().is_some());
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// An integer (classified for cardinal and ordinal matching).
    Number(i64),

    /// A floating-point number (classified by its integer part).
    Float(f64),

    /// A string value.
    String(String),

    /// An already-instantiated nested result.
    Text(StyledText),
}

impl Value {
    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as an instantiated text, if it is one.
    pub fn as_text(&self) -> Option<&StyledText> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
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

impl From<StyledText> for Value {
    fn from(t: StyledText) -> Self {
        Value::Text(t)
    }
}
