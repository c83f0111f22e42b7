//! Reference implementations of the [`Builder`](crate::dispatch::Builder)
//! protocol.
//!
//! - **[predicate]** - compiles a query into an in-memory predicate over
//!   JSON documents
//! - **[sql]** - renders a parameterized SQL `SELECT ... WHERE ...`
//!
//! Both keep their policy (allow-lists, case handling, which operators are
//! understood) in their own option types; the parser and the dispatch
//! engine know nothing about it.
pub mod predicate;
pub mod sql;

pub use predicate::{Predicate, PredicateBuilder, PredicateError, PredicateOptions};
pub use sql::{SqlBuilder, SqlError, SqlOptions, SqlQuery};
