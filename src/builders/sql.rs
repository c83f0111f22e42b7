use serde::Serialize;
use thiserror::Error;

use crate::{
    ast::{ComparisonOp, EqualityOp, Selector},
    dispatch::{BuildContext, Builder},
    value::Value,
};

/// Options understood by [`SqlBuilder`].
#[derive(Debug, Clone, Default)]
pub struct SqlOptions {
    /// Table to select from
    pub table: String,
    /// Selected columns; empty selects `*`
    pub select: Vec<String>,
    /// If set, only these selectors (as written in the query) are accepted
    pub allowed: Option<Vec<String>>,
    /// Lower-case string comparisons and use `ILIKE` for wildcards
    pub case_insensitive: bool,
}

/// A rendered query with positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    #[error("No table given")]
    MissingTable,

    #[error("Selector '{0}' is not permitted")]
    SelectorNotPermitted(String),

    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("Operator '{op}' cannot be used with a {found} value")]
    IncompatibleValue { op: String, found: &'static str },
}

/// Renders queries as parameterized SQL. The parameter list is the
/// builder state, so placeholders are numbered in the order constraints
/// appear in the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlBuilder;

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column(selector: &Selector) -> String {
    match &selector.association {
        Some(assoc) => format!("{}.{}", quote_ident(assoc), quote_ident(&selector.field)),
        None => quote_ident(&selector.field),
    }
}

/// Converts a `*` wildcard into a `LIKE` pattern, escaping `%`, `_` and `\`.
fn like_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        match ch {
            '*' => out.push('%'),
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

fn lowercase(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::List(items) => Value::List(items.into_iter().map(lowercase).collect()),
        other => other,
    }
}

fn bind(params: &mut Vec<Value>, value: Value) -> String {
    params.push(value);
    format!("${}", params.len())
}

impl Builder for SqlBuilder {
    type Options = SqlOptions;
    type Partial = String;
    type State = Vec<Value>;
    type Output = SqlQuery;
    type Error = SqlError;

    fn init(&self, ctx: &BuildContext<'_, SqlOptions>) -> Result<(String, Vec<Value>), SqlError> {
        let options = ctx.options;
        if options.table.is_empty() {
            return Err(SqlError::MissingTable);
        }

        let columns = if options.select.is_empty() {
            "*".to_string()
        } else {
            options
                .select
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let base = format!("SELECT {} FROM {}", columns, quote_ident(&options.table));
        Ok((base, Vec::new()))
    }

    fn transform(
        &self,
        ctx: &BuildContext<'_, SqlOptions>,
        selector: Selector,
        value: Option<Value>,
    ) -> Result<(Selector, Option<Value>), SqlError> {
        if let Some(allowed) = &ctx.options.allowed {
            let name = selector.to_string();
            if !allowed.contains(&name) {
                return Err(SqlError::SelectorNotPermitted(name));
            }
        }

        let value = if ctx.options.case_insensitive {
            value.map(lowercase)
        } else {
            value
        };

        Ok((selector, value))
    }

    fn handle_or(
        &self,
        _ctx: &BuildContext<'_, SqlOptions>,
        left: String,
        right: String,
        params: Vec<Value>,
    ) -> Result<(String, Vec<Value>), SqlError> {
        Ok((format!("({} OR {})", left, right), params))
    }

    fn handle_and(
        &self,
        _ctx: &BuildContext<'_, SqlOptions>,
        left: String,
        right: String,
        params: Vec<Value>,
    ) -> Result<(String, Vec<Value>), SqlError> {
        Ok((format!("({} AND {})", left, right), params))
    }

    fn handle_bare_selector(
        &self,
        _ctx: &BuildContext<'_, SqlOptions>,
        selector: Selector,
        params: Vec<Value>,
    ) -> Result<(String, Vec<Value>), SqlError> {
        Ok((format!("{} IS NOT NULL", column(&selector)), params))
    }

    fn handle_value_constraint(
        &self,
        ctx: &BuildContext<'_, SqlOptions>,
        selector: Selector,
        op: EqualityOp,
        value: Value,
        mut params: Vec<Value>,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let insensitive = ctx.options.case_insensitive;
        let negated = op == EqualityOp::NotEqual;
        let col = column(&selector);

        let fragment = match value {
            Value::String(s) if s.contains('*') => {
                let keyword = match (negated, insensitive) {
                    (false, false) => "LIKE",
                    (true, false) => "NOT LIKE",
                    (false, true) => "ILIKE",
                    (true, true) => "NOT ILIKE",
                };
                let p = bind(&mut params, Value::String(like_pattern(&s)));
                format!("{} {} {}", col, keyword, p)
            }
            Value::List(items) => {
                let text_items = items.iter().any(|v| matches!(v, Value::String(_)));
                let placeholders = items
                    .into_iter()
                    .map(|item| bind(&mut params, item))
                    .collect::<Vec<_>>()
                    .join(", ");
                let col = if insensitive && text_items {
                    format!("LOWER({})", col)
                } else {
                    col
                };
                let keyword = if negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", col, keyword, placeholders)
            }
            scalar => {
                let col = if insensitive && matches!(scalar, Value::String(_)) {
                    format!("LOWER({})", col)
                } else {
                    col
                };
                let p = bind(&mut params, scalar);
                format!("{} {} {}", col, if negated { "<>" } else { "=" }, p)
            }
        };

        Ok((fragment, params))
    }

    fn handle_comparison_constraint(
        &self,
        ctx: &BuildContext<'_, SqlOptions>,
        selector: Selector,
        op: ComparisonOp,
        value: Value,
        mut params: Vec<Value>,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let col = column(&selector);

        let symbol = match &op {
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::IsNull => {
                return match value {
                    Value::Boolean(true) => Ok((format!("{} IS NULL", col), params)),
                    Value::Boolean(false) => Ok((format!("{} IS NOT NULL", col), params)),
                    other => Err(SqlError::IncompatibleValue {
                        op: op.to_string(),
                        found: other.type_name(),
                    }),
                };
            }
            ComparisonOp::Custom(name) => return Err(SqlError::UnsupportedOperator(name.clone())),
        };

        if !matches!(value, Value::Number(_) | Value::String(_)) {
            return Err(SqlError::IncompatibleValue {
                op: op.to_string(),
                found: value.type_name(),
            });
        }

        let col = if ctx.options.case_insensitive && matches!(value, Value::String(_)) {
            format!("LOWER({})", col)
        } else {
            col
        };
        let p = bind(&mut params, value);
        Ok((format!("{} {} {}", col, symbol, p), params))
    }

    fn finish(
        &self,
        _ctx: &BuildContext<'_, SqlOptions>,
        base: String,
        tree: String,
        params: Vec<Value>,
    ) -> Result<SqlQuery, SqlError> {
        Ok(SqlQuery {
            sql: format!("{} WHERE {}", base, tree),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(like_pattern("*Doe"), "%Doe");
        assert_eq!(like_pattern("50%_off*"), "50\\%\\_off%");
    }

    #[test]
    fn test_quote_ident_doubles_quotes() {
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
