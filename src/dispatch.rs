//! Dispatch engine and builder protocol.
//!
//! A [`Builder`] turns a parsed [`Expression`] into some other query
//! representation. The engine walks the tree depth first, left child before
//! right child, calling one builder callback per node and threading the
//! builder's state through every call by value. The first error returned by
//! any callback stops the walk and is handed back unchanged.
//!
//! ```text
//! init ─► handle_* (post-order over the tree) ─► finish
//! ```

use tracing::{debug, trace};

use crate::{
    ast::{ComparisonOp, EqualityOp, Expression, Selector},
    value::Value,
};

/// Read-only context handed to every builder callback.
#[derive(Debug)]
pub struct BuildContext<'a, O> {
    /// Root of the tree being built
    pub ast: &'a Expression,
    /// Builder-defined options, never interpreted by the engine
    pub options: &'a O,
}

// Manual impls: derive would require `O: Clone`/`O: Copy`.
impl<O> Clone for BuildContext<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for BuildContext<'_, O> {}

/// Capability set a concrete builder implements.
///
/// The output, intermediate output, state and error types are all chosen by
/// the builder. Builders are expected to be pure: the same tree and options
/// must always produce the same output.
pub trait Builder {
    /// Builder-specific configuration (allow-lists, case sensitivity, ...)
    type Options;
    /// Intermediate result produced for each subtree
    type Partial;
    /// Accumulator threaded through the whole walk
    type State;
    /// Final result of [`Builder::finish`]
    type Output;
    type Error;

    /// Called once before the walk. Returns the base output (for example
    /// the `SELECT ... FROM ...` part of a SQL query) and the initial state.
    fn init(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    /// Rewrites a selector and its value before the constraint handler
    /// runs. Bare selectors are passed with `None`, and any value returned
    /// for them is ignored. For constraints with a value, returning `None`
    /// keeps the original value.
    fn transform(
        &self,
        _ctx: &BuildContext<'_, Self::Options>,
        selector: Selector,
        value: Option<Value>,
    ) -> Result<(Selector, Option<Value>), Self::Error> {
        Ok((selector, value))
    }

    fn handle_or(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        left: Self::Partial,
        right: Self::Partial,
        state: Self::State,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    fn handle_and(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        left: Self::Partial,
        right: Self::Partial,
        state: Self::State,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    /// `selector` on its own: the selector is present and not null.
    fn handle_bare_selector(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        selector: Selector,
        state: Self::State,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    /// `selector==value` and `selector!=value`.
    fn handle_value_constraint(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        selector: Selector,
        op: EqualityOp,
        value: Value,
        state: Self::State,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    /// `selector=op=value`.
    fn handle_comparison_constraint(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        selector: Selector,
        op: ComparisonOp,
        value: Value,
        state: Self::State,
    ) -> Result<(Self::Partial, Self::State), Self::Error>;

    /// Assembles the final output from the base returned by `init`, the
    /// reduced tree and the final state.
    fn finish(
        &self,
        ctx: &BuildContext<'_, Self::Options>,
        base: Self::Partial,
        tree: Self::Partial,
        state: Self::State,
    ) -> Result<Self::Output, Self::Error>;
}

/// Runs `builder` over `ast`.
///
/// # Examples
///
/// ```
/// use fiql::{build, parse};
/// use fiql::builders::predicate::{PredicateBuilder, PredicateOptions};
/// use serde_json::json;
///
/// let ast = parse("age=ge=18;name==J*").unwrap();
/// let predicate = build(&ast, &PredicateBuilder, &PredicateOptions::default()).unwrap();
///
/// assert!(predicate.matches(&json!({"name": "Jane", "age": 30})));
/// assert!(!predicate.matches(&json!({"name": "Jane", "age": 12})));
/// ```
pub fn run<B: Builder>(
    ast: &Expression,
    builder: &B,
    options: &B::Options,
) -> Result<B::Output, B::Error> {
    let ctx = BuildContext { ast, options };

    debug!(depth = ast.depth(), "dispatching expression to builder");
    let (base, state) = builder.init(&ctx)?;
    let (tree, state) = walk(ast, builder, &ctx, state)?;
    let output = builder.finish(&ctx, base, tree, state)?;
    debug!("builder finished");

    Ok(output)
}

fn walk<B: Builder>(
    expr: &Expression,
    builder: &B,
    ctx: &BuildContext<'_, B::Options>,
    state: B::State,
) -> Result<(B::Partial, B::State), B::Error> {
    match expr {
        Expression::Or { left, right } => {
            let (left, state) = walk(left, builder, ctx, state)?;
            let (right, state) = walk(right, builder, ctx, state)?;
            trace!("handle_or");
            builder.handle_or(ctx, left, right, state)
        }
        Expression::And { left, right } => {
            let (left, state) = walk(left, builder, ctx, state)?;
            let (right, state) = walk(right, builder, ctx, state)?;
            trace!("handle_and");
            builder.handle_and(ctx, left, right, state)
        }
        Expression::Constraint { selector } => {
            // a bare selector has no value to rewrite
            let (selector, _) = builder.transform(ctx, selector.clone(), None)?;
            trace!(%selector, "handle_bare_selector");
            builder.handle_bare_selector(ctx, selector, state)
        }
        Expression::ConstraintWithValue {
            selector,
            op,
            value,
        } => {
            let (selector, value) = transformed(builder, ctx, selector, value)?;
            trace!(%selector, %op, "handle_value_constraint");
            builder.handle_value_constraint(ctx, selector, *op, value, state)
        }
        Expression::ConstraintWithComparison {
            selector,
            op,
            value,
        } => {
            let (selector, value) = transformed(builder, ctx, selector, value)?;
            trace!(%selector, %op, "handle_comparison_constraint");
            builder.handle_comparison_constraint(ctx, selector, op.clone(), value, state)
        }
    }
}

/// Applies the builder's rewrite hook to a constraint that carries a value.
/// A hook that drops the value leaves the original one in place.
fn transformed<B: Builder>(
    builder: &B,
    ctx: &BuildContext<'_, B::Options>,
    selector: &Selector,
    value: &Value,
) -> Result<(Selector, Value), B::Error> {
    let (selector, rewritten) = builder.transform(ctx, selector.clone(), Some(value.clone()))?;
    Ok((selector, rewritten.unwrap_or_else(|| value.clone())))
}
