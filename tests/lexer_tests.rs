// tests/lexer_tests.rs

use fiql::ast::Token;
use fiql::error::SyntaxError;
use fiql::lexer::{Lexer, tokenize};

fn kinds(input: &str) -> Vec<Token> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

fn word(s: &str) -> Token {
    Token::Word(s.to_string())
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (";", Token::Semicolon),
        (",", Token::Comma),
        ("(", Token::LParen),
        (")", Token::RParen),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_empty_input_is_eof() {
    assert_eq!(kinds(""), vec![Token::Eof]);
    assert_eq!(kinds("   \t\n"), vec![Token::Eof]);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_equality_operators() {
    assert_eq!(kinds("=="), vec![Token::Equal, Token::Eof]);
    assert_eq!(kinds("!="), vec![Token::NotEqual, Token::Eof]);
}

#[test]
fn test_comparison_operators() {
    for name in ["gt", "lt", "ge", "le", "isnull", "like", "IN"] {
        let input = format!("={}=", name);
        assert_eq!(
            kinds(&input),
            vec![Token::Comparison(name.to_string()), Token::Eof],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_lone_equals_is_rejected() {
    let err = tokenize("a=5").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::UnexpectedToken {
            found: "'='".to_string(),
            position: 1
        }
    );
}

#[test]
fn test_unclosed_comparison_operator_is_rejected() {
    assert!(matches!(
        tokenize("a=gt5"),
        Err(SyntaxError::UnexpectedToken { position: 1, .. })
    ));
    assert!(matches!(
        tokenize("a=g1="),
        Err(SyntaxError::UnexpectedToken { position: 1, .. })
    ));
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_words_stop_at_delimiters() {
    assert_eq!(
        kinds("a.b==x,y;(z)"),
        vec![
            word("a.b"),
            Token::Equal,
            word("x"),
            Token::Comma,
            word("y"),
            Token::Semicolon,
            Token::LParen,
            word("z"),
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_words_keep_special_characters() {
    assert_eq!(
        kinds("date=ge=2024-01-01T00:00:00Z"),
        vec![
            word("date"),
            Token::Comparison("ge".into()),
            word("2024-01-01T00:00:00Z"),
            Token::Eof,
        ]
    );
    assert_eq!(kinds("!x"), vec![word("!x"), Token::Eof]);
    assert_eq!(kinds("O'Brien"), vec![word("O'Brien"), Token::Eof]);
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(kinds(" a == 1 ; b "), kinds("a==1;b"));
}

// ============================================================================
// Quoted strings
// ============================================================================

#[test]
fn test_quoted_string() {
    assert_eq!(
        kinds("'hello, world; (x)'"),
        vec![Token::Quoted("hello, world; (x)".into()), Token::Eof]
    );
}

#[test]
fn test_escaped_quote() {
    assert_eq!(
        kinds(r"'O\'Brien'"),
        vec![Token::Quoted("O'Brien".into()), Token::Eof]
    );
}

#[test]
fn test_escaped_backslash_and_unknown_escape() {
    assert_eq!(
        kinds(r"'a\\b\nc'"),
        vec![Token::Quoted(r"a\b\nc".into()), Token::Eof]
    );
}

#[test]
fn test_empty_quoted_string() {
    assert_eq!(kinds("''"), vec![Token::Quoted(String::new()), Token::Eof]);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize("name=='abc"),
        Err(SyntaxError::UnterminatedString { position: 6 })
    );
    assert_eq!(
        tokenize(r"'abc\"),
        Err(SyntaxError::UnterminatedString { position: 0 })
    );
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_offsets_are_character_based() {
    let tokens = tokenize("näme==ü;x").unwrap();
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 4, 6, 7, 8, 9]);
}
