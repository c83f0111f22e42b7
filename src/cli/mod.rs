//! CLI support for fiql
//!
//! Provides programmatic access to the `fiql` commands so they can be
//! embedded in other tools.

mod check;
mod docs;
mod filter;
mod sql;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use filter::{FilterOptions, execute_filter};
pub use sql::{SqlCommandOptions, execute_sql};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] crate::SyntaxError),

    #[error("Filter error: {0}")]
    Predicate(#[from] crate::builders::PredicateError),

    #[error("SQL error: {0}")]
    Sql(#[from] crate::builders::SqlError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'fiql docs' to see available categories.")]
    UnknownCategory(String),
}
