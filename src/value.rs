use serde::Serialize;
use std::fmt;

/// A typed literal taken from a FIQL query.
///
/// Bare literals are typed by trial when parsed: `true`/`false` become
/// booleans, numeric text becomes a number and everything else is a
/// string. Quoted literals are always strings.
///
/// # Examples
///
/// ```
/// use fiql::value::{Number, Value};
///
/// let flag = Value::Boolean(true);
/// let age = Value::Number(Number::Integer(18));
/// let score = Value::Number(Number::Float(4.5));
/// let name = Value::String("O'Brien".to_string());
/// let ids = Value::List(vec![age.clone(), Value::String("x".into())]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `true` or `false`
    Boolean(bool),

    /// Integer or float, depending on the presence of a decimal point
    Number(Number),

    /// Quoted strings and any bare literal that is not a boolean or number
    String(String),

    /// Parenthesized list, only produced for `==` and `!=`; each element
    /// keeps its own literal type
    List(Vec<Value>),
}

/// Numeric literal. Integers keep their exact value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Human-readable type name, used in builder error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Float(_)) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
