//! Filter JSON documents with a FIQL query

use super::CliError;
use crate::{
    build,
    builders::predicate::{PredicateBuilder, PredicateOptions},
    parse,
};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub query: String,
    /// JSON array of documents, or a single document
    pub input: Option<String>,
    pub case_insensitive: bool,
    /// Restrict the selectors a query may use
    pub allowed: Option<Vec<String>>,
}

/// Returns the documents that match, as a JSON array.
pub fn execute_filter(options: &FilterOptions) -> Result<serde_json::Value, CliError> {
    let ast = parse(&options.query)?;

    let predicate_options = PredicateOptions {
        case_insensitive: options.case_insensitive,
        allowed: options.allowed.clone(),
        ..PredicateOptions::default()
    };
    let predicate = build(&ast, &PredicateBuilder, &predicate_options)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let docs = match serde_json::from_str(json_str)? {
        serde_json::Value::Array(items) => items,
        single => vec![single],
    };

    let matching = predicate.filter(&docs).into_iter().cloned().collect();
    Ok(serde_json::Value::Array(matching))
}
