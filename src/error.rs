//! Syntax errors raised by the lexer and parser.

use thiserror::Error;

/// Errors that can occur while tokenizing or parsing a FIQL query.
///
/// Every variant carries the character offset (zero based) where the
/// offending construct starts, so callers can point at the input without
/// re-parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A token appeared where the grammar does not allow it, or a required
    /// token (such as a value after an operator) is missing.
    #[error("Unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// A quoted string reached end of input without its closing `'`.
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// A `(` without a matching `)`.
    #[error("Unbalanced parentheses: group opened at position {position} is never closed")]
    UnbalancedParentheses { position: usize },

    /// An operator with nothing in front of it.
    #[error("Empty selector before operator at position {position}")]
    EmptySelector { position: usize },

    /// A selector with more than one `.` or an empty path segment.
    #[error("Invalid selector '{selector}' at position {position}")]
    InvalidSelector { selector: String, position: usize },

    /// A parenthesized value list after a comparison operator.
    #[error("Value lists are only allowed with '==' and '!=', not with '{operator}' (position {position})")]
    InvalidListInComparisonContext { operator: String, position: usize },

    /// Parenthesized groups nest deeper than the configured limit.
    #[error("Expression nesting exceeds the limit of {limit} at position {position}")]
    NestingTooDeep { limit: usize, position: usize },

    /// The query holds more constraints than the configured limit.
    #[error("Query has more than {limit} constraints (position {position})")]
    TooManyTerms { limit: usize, position: usize },
}

impl SyntaxError {
    /// Character offset at which the error was detected.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::UnterminatedString { position }
            | SyntaxError::UnbalancedParentheses { position }
            | SyntaxError::EmptySelector { position }
            | SyntaxError::InvalidSelector { position, .. }
            | SyntaxError::InvalidListInComparisonContext { position, .. }
            | SyntaxError::NestingTooDeep { position, .. }
            | SyntaxError::TooManyTerms { position, .. } => *position,
        }
    }
}
