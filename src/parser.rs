use regex::Regex;
use std::{mem, sync::LazyLock};
use tracing::debug;

use crate::{
    ast::{ComparisonOp, EqualityOp, Expression, Selector, SpannedToken, Token},
    error::SyntaxError,
    lexer::Lexer,
    value::{Number, Value},
};

/// Default bound on parenthesized group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default bound on the number of constraints in one query.
pub const DEFAULT_MAX_TERMS: usize = 4096;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("numeric literal pattern is valid")
});

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of parenthesized groups
    pub max_depth: usize,
    /// Maximum number of constraints across the whole query. Chains nest to
    /// the right, so this also bounds the height of the tree.
    pub max_terms: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

/// A subtree with its height and the offset where it starts.
struct Parsed {
    expr: Expression,
    depth: usize,
    offset: usize,
}

pub struct Parser {
    tokens: Vec<SpannedToken>,
    index: usize,
    terms: usize,
    config: ParserConfig,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, SyntaxError> {
        Ok(Parser::from_tokens(lexer.tokenize()?))
    }

    /// Builds a parser over an already tokenized stream. A missing trailing
    /// `Eof` is added. Tokens after an earlier `Eof` are rejected by
    /// [`Parser::parse`].
    pub fn from_tokens(mut tokens: Vec<SpannedToken>) -> Self {
        if tokens.last().is_none_or(|t| t.token != Token::Eof) {
            let offset = tokens.last().map_or(0, |t| t.offset + 1);
            tokens.push(SpannedToken::new(Token::Eof, offset));
        }
        Parser {
            tokens,
            index: 0,
            terms: 0,
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    fn current(&self) -> &SpannedToken {
        // from_tokens guarantees a trailing Eof, and advance never moves past it
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn offset(&self) -> usize {
        self.current().offset
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current().token) == mem::discriminant(token)
    }

    fn take_token(&mut self) -> Token {
        let token = self.current().token.clone();
        self.advance();
        token
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            found: self.current().token.to_string(),
            position: self.offset(),
        }
    }

    /// Parses the whole token stream into a single expression.
    pub fn parse(&mut self) -> Result<Expression, SyntaxError> {
        let parsed = self.parse_or(0)?;

        if !self.check(&Token::Eof) {
            return Err(self.unexpected());
        }

        if let Some(trailing) = self.tokens.get(self.index + 1) {
            return Err(SyntaxError::UnexpectedToken {
                found: trailing.token.to_string(),
                position: trailing.offset,
            });
        }

        debug!(depth = parsed.depth, "parsed FIQL expression");
        Ok(parsed.expr)
    }

    fn parse_or(&mut self, nesting: usize) -> Result<Parsed, SyntaxError> {
        let mut operands = vec![self.parse_and(nesting)?];

        while self.check(&Token::Comma) {
            self.advance();
            operands.push(self.parse_and(nesting)?);
        }

        self.fold_right(operands, Expression::or)
    }

    fn parse_and(&mut self, nesting: usize) -> Result<Parsed, SyntaxError> {
        let mut operands = vec![self.parse_term(nesting)?];

        while self.check(&Token::Semicolon) {
            self.advance();
            operands.push(self.parse_term(nesting)?);
        }

        self.fold_right(operands, Expression::and)
    }

    /// Nests a chain to the right: `[a, b, c]` becomes `join(a, join(b, c))`.
    fn fold_right(
        &self,
        operands: Vec<Parsed>,
        join: fn(Expression, Expression) -> Expression,
    ) -> Result<Parsed, SyntaxError> {
        let mut rest = operands.into_iter().rev();
        let Some(mut acc) = rest.next() else {
            return Err(self.unexpected());
        };

        for operand in rest {
            acc = Parsed {
                depth: 1 + operand.depth.max(acc.depth),
                expr: join(operand.expr, acc.expr),
                offset: operand.offset,
            };
        }

        Ok(acc)
    }

    fn parse_term(&mut self, nesting: usize) -> Result<Parsed, SyntaxError> {
        let offset = self.offset();

        match &self.current().token {
            Token::LParen => {
                if nesting + 1 > self.config.max_depth {
                    return Err(SyntaxError::NestingTooDeep {
                        limit: self.config.max_depth,
                        position: offset,
                    });
                }
                self.advance();

                let mut inner = self.parse_or(nesting + 1)?;

                match self.current().token {
                    Token::RParen => self.advance(),
                    Token::Eof => return Err(SyntaxError::UnbalancedParentheses { position: offset }),
                    _ => return Err(self.unexpected()),
                }

                inner.offset = offset;
                Ok(inner)
            }
            Token::Word(_) => {
                self.terms += 1;
                if self.terms > self.config.max_terms {
                    return Err(SyntaxError::TooManyTerms {
                        limit: self.config.max_terms,
                        position: offset,
                    });
                }

                let expr = self.parse_constraint()?;
                Ok(Parsed {
                    expr,
                    depth: 1,
                    offset,
                })
            }
            Token::Equal | Token::NotEqual | Token::Comparison(_) => {
                Err(SyntaxError::EmptySelector { position: offset })
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_constraint(&mut self) -> Result<Expression, SyntaxError> {
        let offset = self.offset();
        let word = match self.take_token() {
            Token::Word(w) => w,
            _ => unreachable!("parse_constraint is only entered on a word"),
        };

        let selector = Selector::from_path(&word).ok_or(SyntaxError::InvalidSelector {
            selector: word.clone(),
            position: offset,
        })?;

        match &self.current().token {
            Token::Equal | Token::NotEqual => {
                let op = match self.take_token() {
                    Token::NotEqual => EqualityOp::NotEqual,
                    _ => EqualityOp::Equal,
                };
                let value = self.parse_value()?;
                Ok(Expression::with_value(selector, op, value))
            }
            Token::Comparison(name) => {
                let op = ComparisonOp::from_name(name);
                self.advance();

                if self.check(&Token::LParen) {
                    return Err(SyntaxError::InvalidListInComparisonContext {
                        operator: op.name().to_string(),
                        position: self.offset(),
                    });
                }

                let value = self.parse_literal()?;
                Ok(Expression::with_comparison(selector, op, value))
            }
            _ => Ok(Expression::constraint(selector)),
        }
    }

    /// A single literal or a parenthesized list of literals.
    fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        if !self.check(&Token::LParen) {
            return self.parse_literal();
        }

        let open = self.offset();
        self.advance();

        let mut items = vec![self.parse_literal()?];
        loop {
            match self.current().token {
                Token::Comma => {
                    self.advance();
                    items.push(self.parse_literal()?);
                }
                Token::RParen => {
                    self.advance();
                    return Ok(Value::List(items));
                }
                Token::Eof => return Err(SyntaxError::UnbalancedParentheses { position: open }),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_literal(&mut self) -> Result<Value, SyntaxError> {
        if !self.current().token.is_literal() {
            return Err(self.unexpected());
        }

        match self.take_token() {
            Token::Quoted(s) => Ok(Value::String(s)),
            Token::Word(w) => Ok(type_literal(w)),
            _ => unreachable!("is_literal admits only words and quoted strings"),
        }
    }
}

/// Types a bare literal by trial: boolean, then number, then string.
pub fn type_literal(word: String) -> Value {
    match word.as_str() {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }

    if NUMBER.is_match(&word) {
        let number = if word.contains('.') {
            word.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Number::Float)
        } else {
            word.parse::<i64>().ok().map(Number::Integer)
        };
        if let Some(n) = number {
            return Value::Number(n);
        }
    }

    Value::String(word)
}

/// Parses a FIQL string with the default configuration.
pub fn parse(input: &str) -> Result<Expression, SyntaxError> {
    parse_with(input, &ParserConfig::default())
}

/// Parses a FIQL string with an explicit configuration.
pub fn parse_with(input: &str, config: &ParserConfig) -> Result<Expression, SyntaxError> {
    Parser::new(Lexer::new(input))?
        .with_config(*config)
        .parse()
}
