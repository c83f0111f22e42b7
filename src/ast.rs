//! # FIQL - Abstract Syntax Tree
//!
//! This module defines the tokens and the expression tree produced when a
//! FIQL (Feed Item Query Language) filter is parsed.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - The expression tree (`Or`, `And` and constraints)
//! - **[operators]** - Equality and comparison operators
//! - **[selector]** - Field names, optionally qualified by an association
//!
//! Literal values live in [`crate::value`].
//!
//! ## Quick Start
//!
//! ```text
//! age=ge=25;name==*Doe
//! ```
//!
//! This filter keeps records whose `age` is at least 25 and whose `name`
//! ends in `Doe`.
//!
//! ## Core Concepts
//!
//! ### Combinators
//!
//! - **`;`** - logical AND, binds tighter than OR
//! - **`,`** - logical OR
//! - **`( )`** - grouping, only changes precedence and leaves no node behind
//!
//! Chains nest to the right: `a;b;c` is `And(a, And(b, c))`.
//!
//! ### Constraints
//!
//! - `selector` - the selector is present (not null)
//! - `selector==value` / `selector!=value` - equality, value may be a list
//! - `selector=op=value` - comparison (`gt`, `ge`, `lt`, `le`, `isnull` or
//!   any custom alphabetic operator), value is a single literal
//!
//! ## Examples
//!
//! ```text
//! (status==active,status==pending);groups.name=='Core Team'
//! tags==(rust,fiql);score=gt=4.5
//! deleted_at=isnull=true
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod selector;

pub use tokens::{SpannedToken, Token};
pub use expressions::Expression;
pub use operators::{ComparisonOp, EqualityOp};
pub use selector::Selector;
