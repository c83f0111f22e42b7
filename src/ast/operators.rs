use serde::Serialize;
use std::fmt;

/// Equality operators, the only ones that accept value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityOp {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
}

impl EqualityOp {
    /// The FIQL spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            EqualityOp::Equal => "==",
            EqualityOp::NotEqual => "!=",
        }
    }
}

impl fmt::Display for EqualityOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Comparison operators written as `=name=`.
///
/// Unknown names are kept as [`ComparisonOp::Custom`]; deciding whether
/// they mean anything is up to the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// Greater than (`=gt=`)
    GreaterThan,
    /// Less than (`=lt=`)
    LessThan,
    /// Greater than or equal (`=ge=`)
    GreaterOrEqual,
    /// Less than or equal (`=le=`)
    LessOrEqual,
    /// Null check (`=isnull=`)
    IsNull,
    /// Any other alphabetic operator, e.g. `=like=`
    Custom(String),
}

impl ComparisonOp {
    /// Maps the name between the `=` signs to an operator.
    pub fn from_name(name: &str) -> Self {
        match name {
            "gt" => ComparisonOp::GreaterThan,
            "lt" => ComparisonOp::LessThan,
            "ge" => ComparisonOp::GreaterOrEqual,
            "le" => ComparisonOp::LessOrEqual,
            "isnull" => ComparisonOp::IsNull,
            other => ComparisonOp::Custom(other.to_string()),
        }
    }

    /// The name between the `=` signs.
    pub fn name(&self) -> &str {
        match self {
            ComparisonOp::GreaterThan => "gt",
            ComparisonOp::LessThan => "lt",
            ComparisonOp::GreaterOrEqual => "ge",
            ComparisonOp::LessOrEqual => "le",
            ComparisonOp::IsNull => "isnull",
            ComparisonOp::Custom(name) => name,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}=", self.name())
    }
}
