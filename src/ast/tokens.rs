use std::fmt;

/// Lexical tokens of a FIQL query.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unquoted run of characters
    ///
    /// Used for selectors and for bare values, which are typed later by
    /// the parser.
    ///
    /// # Examples
    /// ```text
    /// age
    /// groups.name
    /// *Doe
    /// -12.5
    /// ```
    Word(String),

    /// Single-quoted string, already unescaped
    ///
    /// # Examples
    /// ```text
    /// 'John Doe'
    /// 'O\'Brien'
    /// ```
    Quoted(String),

    // Operators
    /// Equality operator (`==`)
    Equal,

    /// Inequality operator (`!=`)
    NotEqual,

    /// Alphabetic comparison operator, stored without the surrounding `=`
    ///
    /// # Examples
    /// ```text
    /// =gt=    // Comparison("gt")
    /// =isnull= // Comparison("isnull")
    /// ```
    Comparison(String),

    // Combinators
    /// Logical AND
    Semicolon,

    /// Logical OR, or list separator inside a value list
    Comma,

    // Delimiters
    /// Left parenthesis for grouping or value lists
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// True for tokens that may start or continue a literal value.
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Word(_) | Token::Quoted(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::Quoted(s) => write!(f, "quoted string '{}'", s),
            Token::Equal => write!(f, "'=='"),
            Token::NotEqual => write!(f, "'!='"),
            Token::Comparison(op) => write!(f, "'={}='", op),
            Token::Semicolon => write!(f, "';'"),
            Token::Comma => write!(f, "','"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

impl SpannedToken {
    pub fn new(token: Token, offset: usize) -> Self {
        SpannedToken { token, offset }
    }
}
