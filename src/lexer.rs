use crate::{
    ast::{SpannedToken, Token},
    error::SyntaxError,
};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// True where a bare word has to stop.
    fn at_delimiter(&self) -> bool {
        match self.current_char() {
            None => true,
            Some(';' | ',' | '(' | ')' | '=') => true,
            Some('!') => self.peek_char(1) == Some('='),
            Some(ch) => ch.is_whitespace(),
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while !self.at_delimiter() {
            if let Some(ch) = self.current_char() {
                result.push(ch);
            }
            self.advance();
        }
        result
    }

    fn read_quoted(&mut self) -> Result<String, SyntaxError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '\'' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            result.push('\\');
                            result.push(other);
                        }
                        None => return Err(SyntaxError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(SyntaxError::UnterminatedString { position: start })
    }

    /// Reads `==` or `=name=`; the current character is the first `=`.
    fn read_operator(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;

        if self.peek_char(1) == Some('=') {
            self.advance();
            self.advance();
            return Ok(Token::Equal);
        }

        let mut len = 1;
        while self.peek_char(len).is_some_and(|c| c.is_ascii_alphabetic()) {
            len += 1;
        }

        if len == 1 || self.peek_char(len) != Some('=') {
            return Err(SyntaxError::UnexpectedToken {
                found: "'='".to_string(),
                position: start,
            });
        }

        let name: String = self.input[start + 1..start + len].iter().collect();
        self.position = start + len + 1;
        Ok(Token::Comparison(name))
    }

    pub fn next_token(&mut self) -> Result<SpannedToken, SyntaxError> {
        self.skip_whitespace();
        let offset = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some(';') => {
                self.advance();
                Token::Semicolon
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('=') => self.read_operator()?,
            Some('!') if self.peek_char(1) == Some('=') => {
                self.advance();
                self.advance();
                Token::NotEqual
            }
            Some('\'') => Token::Quoted(self.read_quoted()?),
            Some(_) => Token::Word(self.read_word()),
        };

        Ok(SpannedToken::new(token, offset))
    }

    /// Consumes the whole input. The returned stream always ends in `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, SyntaxError> {
        let mut tokens = Vec::new();
        loop {
            let next = self.next_token()?;
            let done = next.token == Token::Eof;
            tokens.push(next);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Tokenizes a FIQL string.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, SyntaxError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<Token> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

#[test]
fn test_constraint_tokens() {
    assert_eq!(
        kinds("age=ge=25;name==*Doe"),
        vec![
            Token::Word("age".into()),
            Token::Comparison("ge".into()),
            Token::Word("25".into()),
            Token::Semicolon,
            Token::Word("name".into()),
            Token::Equal,
            Token::Word("*Doe".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_not_equal_splits_word() {
    assert_eq!(
        kinds("name!=x"),
        vec![
            Token::Word("name".into()),
            Token::NotEqual,
            Token::Word("x".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_offsets() {
    let tokens = tokenize("a == 'b c'").unwrap();
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 2, 5, 10]);
}
