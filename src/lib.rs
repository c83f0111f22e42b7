pub mod ast;
pub mod builders;
#[cfg(feature = "cli")]
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{ComparisonOp, EqualityOp, Expression, Selector, SpannedToken, Token};
pub use dispatch::{BuildContext, Builder, run as build};
pub use error::SyntaxError;
pub use lexer::{Lexer, tokenize};
pub use parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_TERMS, Parser, ParserConfig, parse, parse_with};
pub use value::{Number, Value};
