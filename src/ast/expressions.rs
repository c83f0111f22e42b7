use serde::Serialize;

use crate::{
    ast::{ComparisonOp, EqualityOp, Selector},
    value::Value,
};

/// Abstract Syntax Tree node representing a parsed FIQL query.
///
/// The tree is immutable once built. Parenthesized groups do not appear as
/// nodes; they only decide how `Or` and `And` nest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    /// Logical disjunction (`,`), lowest precedence
    ///
    /// # Example
    /// ```text
    /// a,b,c   // Or(a, Or(b, c))
    /// ```
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Logical conjunction (`;`)
    ///
    /// # Example
    /// ```text
    /// a;b;c   // And(a, And(b, c))
    /// ```
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Bare selector, meaning the selector is present and not null
    ///
    /// # Example
    /// ```text
    /// lastname
    /// ```
    Constraint { selector: Selector },

    /// Equality constraint; the value may be a list
    ///
    /// # Examples
    /// ```text
    /// name==John
    /// age!=(18,21)
    /// ```
    ConstraintWithValue {
        selector: Selector,
        op: EqualityOp,
        value: Value,
    },

    /// Comparison constraint; the value is never a list
    ///
    /// # Examples
    /// ```text
    /// age=ge=25
    /// deleted_at=isnull=true
    /// ```
    ConstraintWithComparison {
        selector: Selector,
        op: ComparisonOp,
        value: Value,
    },
}

impl Expression {
    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn constraint(selector: Selector) -> Self {
        Expression::Constraint { selector }
    }

    pub fn with_value(selector: Selector, op: EqualityOp, value: Value) -> Self {
        Expression::ConstraintWithValue { selector, op, value }
    }

    pub fn with_comparison(selector: Selector, op: ComparisonOp, value: Value) -> Self {
        Expression::ConstraintWithComparison { selector, op, value }
    }

    /// The selector of a constraint node, `None` for `Or`/`And`.
    pub fn selector(&self) -> Option<&Selector> {
        match self {
            Expression::Constraint { selector }
            | Expression::ConstraintWithValue { selector, .. }
            | Expression::ConstraintWithComparison { selector, .. } => Some(selector),
            Expression::Or { .. } | Expression::And { .. } => None,
        }
    }

    /// Height of the tree; a single constraint has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Or { left, right } | Expression::And { left, right } => {
                1 + left.depth().max(right.depth())
            }
            _ => 1,
        }
    }

    /// All selectors in depth-first, left-to-right order.
    pub fn selectors(&self) -> Vec<&Selector> {
        let mut out = Vec::new();
        self.collect_selectors(&mut out);
        out
    }

    fn collect_selectors<'a>(&'a self, out: &mut Vec<&'a Selector>) {
        match self {
            Expression::Or { left, right } | Expression::And { left, right } => {
                left.collect_selectors(out);
                right.collect_selectors(out);
            }
            _ => out.extend(self.selector()),
        }
    }
}
