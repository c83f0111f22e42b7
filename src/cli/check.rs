//! Validate queries and print their syntax tree

use super::CliError;
use crate::parser::{ParserConfig, parse_with};

/// Options for the check and parse commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The FIQL query
    pub query: String,
    /// Print the syntax tree as JSON instead of only validating
    pub print_tree: bool,
    /// Pretty-print the syntax tree
    pub pretty: bool,
    pub parser: ParserConfig,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The syntax tree, rendered as JSON
    Tree(String),
}

pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let ast = parse_with(&options.query, &options.parser)?;

    if !options.print_tree {
        return Ok(CheckResult::SyntaxValid);
    }

    let json = if options.pretty {
        serde_json::to_string_pretty(&ast)?
    } else {
        serde_json::to_string(&ast)?
    };
    Ok(CheckResult::Tree(json))
}
