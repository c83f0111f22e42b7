use regex::{Regex, RegexBuilder};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde_json::Value as Json;
use std::{cmp::Ordering, collections::BTreeMap};
use thiserror::Error;

use crate::{
    ast::{ComparisonOp, EqualityOp, Selector},
    dispatch::{BuildContext, Builder},
    value::{Number, Value},
};

/// Options understood by [`PredicateBuilder`].
#[derive(Debug, Clone, Default)]
pub struct PredicateOptions {
    /// Compare strings and wildcards ignoring case
    pub case_insensitive: bool,
    /// If set, only these selectors (as written in the query) are accepted
    pub allowed: Option<Vec<String>>,
    /// Query selector -> document path, applied after the allow-list check
    ///
    /// # Example
    /// `"email" -> "contact.email"`
    pub aliases: BTreeMap<String, String>,
}

/// Errors produced while compiling a predicate.
#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("Selector '{0}' is not permitted")]
    SelectorNotPermitted(String),

    #[error("Alias target '{0}' is not a valid selector")]
    InvalidAlias(String),

    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("Operator '{op}' cannot be used with a {found} value")]
    IncompatibleValue { op: String, found: &'static str },

    #[error("Invalid wildcard pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Ordering test used by `=gt=`, `=ge=`, `=lt=`, `=le=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Bound {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Bound::Greater => ordering == Ordering::Greater,
            Bound::GreaterOrEqual => ordering != Ordering::Less,
            Bound::Less => ordering == Ordering::Less,
            Bound::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// A compiled filter that can be tested against JSON documents.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Matches every document
    Always,
    Any(Box<Predicate>, Box<Predicate>),
    All(Box<Predicate>, Box<Predicate>),
    /// Selector resolves to a non-null value
    Present(Selector),
    /// Equality against a scalar, or membership in a list
    Equals {
        selector: Selector,
        values: Vec<Value>,
        negate: bool,
        case_insensitive: bool,
    },
    /// Wildcard match (`*` matches any run of characters). Quoted and bare
    /// values are treated alike, so a literal `*` cannot be matched.
    Like {
        selector: Selector,
        pattern: Regex,
        negate: bool,
    },
    Compare {
        selector: Selector,
        bound: Bound,
        value: Value,
    },
    /// `=isnull=true` / `=isnull=false`
    IsNull { selector: Selector, expected: bool },
}

impl Predicate {
    /// Tests a document.
    pub fn matches(&self, doc: &Json) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Any(left, right) => left.matches(doc) || right.matches(doc),
            Predicate::All(left, right) => left.matches(doc) && right.matches(doc),
            Predicate::Present(selector) => resolve(doc, selector).iter().any(|v| !v.is_null()),
            Predicate::Equals {
                selector,
                values,
                negate,
                case_insensitive,
            } => {
                let hit = resolve(doc, selector).iter().any(|candidate| {
                    values
                        .iter()
                        .any(|value| json_equals(candidate, value, *case_insensitive))
                });
                hit != *negate
            }
            Predicate::Like {
                selector,
                pattern,
                negate,
            } => {
                let hit = resolve(doc, selector)
                    .iter()
                    .any(|candidate| candidate.as_str().is_some_and(|s| pattern.is_match(s)));
                hit != *negate
            }
            Predicate::Compare {
                selector,
                bound,
                value,
            } => resolve(doc, selector)
                .iter()
                .filter_map(|candidate| json_compare(candidate, value))
                .any(|ordering| bound.accepts(ordering)),
            Predicate::IsNull { selector, expected } => {
                let is_null = resolve(doc, selector).iter().all(|v| v.is_null());
                is_null == *expected
            }
        }
    }

    /// Keeps the documents of `docs` that match.
    pub fn filter<'a>(&self, docs: &'a [Json]) -> Vec<&'a Json> {
        docs.iter().filter(|doc| self.matches(doc)).collect()
    }
}

/// Values a selector points at. A qualified selector whose association is
/// an array yields the field of every element.
fn resolve<'a>(doc: &'a Json, selector: &Selector) -> Vec<&'a Json> {
    let parents: Vec<&Json> = match &selector.association {
        None => vec![doc],
        Some(assoc) => match doc.get(assoc) {
            Some(Json::Array(items)) => items.iter().collect(),
            Some(other) => vec![other],
            None => vec![],
        },
    };

    parents
        .into_iter()
        .filter_map(|parent| parent.get(&selector.field))
        .collect()
}

fn to_decimal(n: &Number) -> Option<Decimal> {
    match n {
        Number::Integer(i) => Some(Decimal::from(*i)),
        Number::Float(f) => Decimal::from_f64(*f),
    }
}

fn json_decimal(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        Some(Decimal::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Decimal::from(u))
    } else {
        n.as_f64().and_then(Decimal::from_f64)
    }
}

fn json_equals(candidate: &Json, value: &Value, case_insensitive: bool) -> bool {
    match (candidate, value) {
        (Json::Bool(a), Value::Boolean(b)) => a == b,
        (Json::Number(a), Value::Number(b)) => {
            matches!((json_decimal(a), to_decimal(b)), (Some(a), Some(b)) if a == b)
        }
        (Json::String(a), Value::String(b)) if case_insensitive => {
            a.to_lowercase() == b.to_lowercase()
        }
        (Json::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

fn json_compare(candidate: &Json, value: &Value) -> Option<Ordering> {
    match (candidate, value) {
        (Json::Number(a), Value::Number(b)) => Some(json_decimal(a)?.cmp(&to_decimal(b)?)),
        (Json::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

fn wildcard(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    RegexBuilder::new(&format!("^{}$", body))
        .case_insensitive(case_insensitive)
        .build()
}

/// Compiles queries into [`Predicate`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateBuilder;

impl Builder for PredicateBuilder {
    type Options = PredicateOptions;
    type Partial = Predicate;
    type State = ();
    type Output = Predicate;
    type Error = PredicateError;

    fn init(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
    ) -> Result<(Predicate, ()), PredicateError> {
        Ok((Predicate::Always, ()))
    }

    fn transform(
        &self,
        ctx: &BuildContext<'_, PredicateOptions>,
        selector: Selector,
        value: Option<Value>,
    ) -> Result<(Selector, Option<Value>), PredicateError> {
        let name = selector.to_string();

        if let Some(allowed) = &ctx.options.allowed {
            if !allowed.contains(&name) {
                return Err(PredicateError::SelectorNotPermitted(name));
            }
        }

        let selector = match ctx.options.aliases.get(&name) {
            Some(target) => Selector::from_path(target)
                .ok_or_else(|| PredicateError::InvalidAlias(target.clone()))?,
            None => selector,
        };

        Ok((selector, value))
    }

    fn handle_or(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
        left: Predicate,
        right: Predicate,
        state: (),
    ) -> Result<(Predicate, ()), PredicateError> {
        Ok((Predicate::Any(Box::new(left), Box::new(right)), state))
    }

    fn handle_and(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
        left: Predicate,
        right: Predicate,
        state: (),
    ) -> Result<(Predicate, ()), PredicateError> {
        Ok((Predicate::All(Box::new(left), Box::new(right)), state))
    }

    fn handle_bare_selector(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
        selector: Selector,
        state: (),
    ) -> Result<(Predicate, ()), PredicateError> {
        Ok((Predicate::Present(selector), state))
    }

    fn handle_value_constraint(
        &self,
        ctx: &BuildContext<'_, PredicateOptions>,
        selector: Selector,
        op: EqualityOp,
        value: Value,
        state: (),
    ) -> Result<(Predicate, ()), PredicateError> {
        let negate = op == EqualityOp::NotEqual;
        let case_insensitive = ctx.options.case_insensitive;

        let predicate = match value {
            Value::String(s) if s.contains('*') => Predicate::Like {
                selector,
                pattern: wildcard(&s, case_insensitive)?,
                negate,
            },
            Value::List(values) => Predicate::Equals {
                selector,
                values,
                negate,
                case_insensitive,
            },
            scalar => Predicate::Equals {
                selector,
                values: vec![scalar],
                negate,
                case_insensitive,
            },
        };

        Ok((predicate, state))
    }

    fn handle_comparison_constraint(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
        selector: Selector,
        op: ComparisonOp,
        value: Value,
        state: (),
    ) -> Result<(Predicate, ()), PredicateError> {
        let bound = match &op {
            ComparisonOp::GreaterThan => Bound::Greater,
            ComparisonOp::GreaterOrEqual => Bound::GreaterOrEqual,
            ComparisonOp::LessThan => Bound::Less,
            ComparisonOp::LessOrEqual => Bound::LessOrEqual,
            ComparisonOp::IsNull => {
                let expected = value.as_bool().ok_or(PredicateError::IncompatibleValue {
                    op: op.to_string(),
                    found: value.type_name(),
                })?;
                return Ok((Predicate::IsNull { selector, expected }, state));
            }
            ComparisonOp::Custom(name) => {
                return Err(PredicateError::UnsupportedOperator(name.clone()));
            }
        };

        if !matches!(value, Value::Number(_) | Value::String(_)) {
            return Err(PredicateError::IncompatibleValue {
                op: op.to_string(),
                found: value.type_name(),
            });
        }

        Ok((
            Predicate::Compare {
                selector,
                bound,
                value,
            },
            state,
        ))
    }

    fn finish(
        &self,
        _ctx: &BuildContext<'_, PredicateOptions>,
        base: Predicate,
        tree: Predicate,
        _state: (),
    ) -> Result<Predicate, PredicateError> {
        Ok(match base {
            Predicate::Always => tree,
            base => Predicate::All(Box::new(base), Box::new(tree)),
        })
    }
}
