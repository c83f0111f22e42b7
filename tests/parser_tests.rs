// tests/parser_tests.rs

use fiql::ast::{ComparisonOp, EqualityOp, Expression, Selector, Token};
use fiql::error::SyntaxError;
use fiql::lexer::{Lexer, tokenize};
use fiql::builders::predicate::{PredicateBuilder, PredicateOptions};
use fiql::build;
use fiql::parser::{Parser, ParserConfig, parse, parse_with};
use fiql::value::{Number, Value};
use pretty_assertions::assert_eq;

fn c(name: &str) -> Expression {
    Expression::constraint(Selector::field(name))
}

fn eq(name: &str, value: impl Into<Value>) -> Expression {
    Expression::with_value(Selector::field(name), EqualityOp::Equal, value.into())
}

fn value_of(input: &str) -> Value {
    match parse(input).unwrap() {
        Expression::ConstraintWithValue { value, .. }
        | Expression::ConstraintWithComparison { value, .. } => value,
        other => panic!("Expected a constraint with a value, got {:?}", other),
    }
}

// ============================================================================
// Precedence and grouping
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse("a,b;c").unwrap(),
        Expression::or(c("a"), Expression::and(c("b"), c("c")))
    );
    assert_eq!(
        parse("a;b,c").unwrap(),
        Expression::or(Expression::and(c("a"), c("b")), c("c"))
    );
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(
        parse("(a,b);c").unwrap(),
        Expression::and(Expression::or(c("a"), c("b")), c("c"))
    );
}

#[test]
fn test_chains_nest_to_the_right() {
    assert_eq!(
        parse("a,b,c").unwrap(),
        Expression::or(c("a"), Expression::or(c("b"), c("c")))
    );
    assert_eq!(
        parse("a;b;c").unwrap(),
        Expression::and(c("a"), Expression::and(c("b"), c("c")))
    );
}

#[test]
fn test_redundant_groups_leave_no_trace() {
    assert_eq!(parse("((a==1))").unwrap(), eq("a", 1));
    assert_eq!(parse("(a);(b)").unwrap(), parse("a;b").unwrap());
}

#[test]
fn test_nested_groups() {
    assert_eq!(
        parse("a;(b,(c;d))").unwrap(),
        Expression::and(
            c("a"),
            Expression::or(c("b"), Expression::and(c("c"), c("d")))
        )
    );
}

// ============================================================================
// Constraints
// ============================================================================

#[test]
fn test_bare_selector() {
    assert_eq!(parse("lastname").unwrap(), c("lastname"));
}

#[test]
fn test_missing_value_after_operator() {
    assert!(matches!(
        parse("lastname=="),
        Err(SyntaxError::UnexpectedToken { position: 10, .. })
    ));
    assert!(matches!(
        parse("a==;b"),
        Err(SyntaxError::UnexpectedToken { position: 3, .. })
    ));
    assert!(matches!(
        parse("a=gt=)"),
        Err(SyntaxError::UnexpectedToken { .. })
    ));
}

#[test]
fn test_not_equal() {
    assert_eq!(
        parse("status!=archived").unwrap(),
        Expression::with_value(
            Selector::field("status"),
            EqualityOp::NotEqual,
            Value::from("archived")
        )
    );
}

#[test]
fn test_comparison_operators() {
    let cases = vec![
        ("age=gt=1", ComparisonOp::GreaterThan),
        ("age=lt=1", ComparisonOp::LessThan),
        ("age=ge=1", ComparisonOp::GreaterOrEqual),
        ("age=le=1", ComparisonOp::LessOrEqual),
        ("age=isnull=1", ComparisonOp::IsNull),
        ("age=near=1", ComparisonOp::Custom("near".into())),
    ];

    for (input, expected) in cases {
        assert_eq!(
            parse(input).unwrap(),
            Expression::with_comparison(Selector::field("age"), expected, Value::from(1)),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_qualified_selector() {
    assert_eq!(
        parse("groups.name==admins").unwrap(),
        Expression::with_value(
            Selector::qualified("groups", "name"),
            EqualityOp::Equal,
            Value::from("admins")
        )
    );
}

#[test]
fn test_invalid_selectors() {
    assert_eq!(
        parse("a.b.c==1"),
        Err(SyntaxError::InvalidSelector {
            selector: "a.b.c".into(),
            position: 0
        })
    );
    assert!(matches!(
        parse("x;.a"),
        Err(SyntaxError::InvalidSelector { position: 2, .. })
    ));
}

#[test]
fn test_empty_selector() {
    assert_eq!(
        parse("==1"),
        Err(SyntaxError::EmptySelector { position: 0 })
    );
    assert_eq!(
        parse("a;=gt=1"),
        Err(SyntaxError::EmptySelector { position: 2 })
    );
}

#[test]
fn test_quoted_selector_is_rejected() {
    assert!(matches!(
        parse("'name'==x"),
        Err(SyntaxError::UnexpectedToken { position: 0, .. })
    ));
}

// ============================================================================
// Literal typing
// ============================================================================

#[test]
fn test_boolean_literals() {
    assert_eq!(value_of("enabled==true"), Value::Boolean(true));
    assert_eq!(value_of("enabled==false"), Value::Boolean(false));
    assert_eq!(value_of("enabled==True"), Value::from("True"));
}

#[test]
fn test_number_literals() {
    assert_eq!(value_of("age==18"), Value::Number(Number::Integer(18)));
    assert_eq!(value_of("age==18.5"), Value::Number(Number::Float(18.5)));
    assert_eq!(value_of("age==-3"), Value::Number(Number::Integer(-3)));
    assert_eq!(value_of("age==+7"), Value::Number(Number::Integer(7)));
    assert_eq!(value_of("age==-0.25"), Value::Number(Number::Float(-0.25)));
}

#[test]
fn test_number_lookalikes_are_strings() {
    for literal in ["1e5", "inf", "NaN", "18.", ".5", "1.2.3", "99999999999999999999"] {
        let input = format!("x=={}", literal);
        assert_eq!(value_of(&input), Value::from(literal), "Failed for {}", literal);
    }

    let huge = format!("1{}.0", "0".repeat(400));
    assert_eq!(value_of(&format!("x=={}", huge)), Value::from(huge.as_str()));
}

#[test]
fn test_string_literals() {
    assert_eq!(value_of("name==John"), Value::from("John"));
    assert_eq!(value_of("name==*Doe"), Value::from("*Doe"));
}

#[test]
fn test_quoted_literals_are_always_strings() {
    assert_eq!(value_of("code=='42'"), Value::from("42"));
    assert_eq!(value_of("flag=='true'"), Value::from("true"));
    assert_eq!(value_of("name=='John Doe'"), Value::from("John Doe"));
}

#[test]
fn test_escaped_quote_in_value() {
    assert_eq!(value_of("name=='O\\'Brien'"), Value::from("O'Brien"));
}

// ============================================================================
// Value lists
// ============================================================================

#[test]
fn test_list_value() {
    assert_eq!(
        value_of("age==(1,2,3)"),
        Value::List(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
}

#[test]
fn test_list_elements_are_typed_individually() {
    assert_eq!(
        value_of("x!=(1, 2.5, true, 'a,b', c)"),
        Value::List(vec![
            Value::from(1),
            Value::from(2.5),
            Value::Boolean(true),
            Value::from("a,b"),
            Value::from("c"),
        ])
    );
}

#[test]
fn test_list_rejected_for_comparison() {
    assert_eq!(
        parse("age=ge=(1,2,3)"),
        Err(SyntaxError::InvalidListInComparisonContext {
            operator: "ge".into(),
            position: 7
        })
    );
}

#[test]
fn test_malformed_lists() {
    assert!(matches!(parse("a==()"), Err(SyntaxError::UnexpectedToken { .. })));
    assert!(matches!(parse("a==(1,)"), Err(SyntaxError::UnexpectedToken { .. })));
    assert!(matches!(parse("a==((1))"), Err(SyntaxError::UnexpectedToken { .. })));
    assert!(matches!(parse("a==(1 2)"), Err(SyntaxError::UnexpectedToken { .. })));
    assert_eq!(
        parse("a==(1,2"),
        Err(SyntaxError::UnbalancedParentheses { position: 3 })
    );
}

#[test]
fn test_list_after_equality_inside_group() {
    assert_eq!(
        parse("(a==(1,2),b)").unwrap(),
        Expression::or(
            eq("a", Value::List(vec![Value::from(1), Value::from(2)])),
            c("b")
        )
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unbalanced_parentheses() {
    assert_eq!(
        parse("(a==1"),
        Err(SyntaxError::UnbalancedParentheses { position: 0 })
    );
    assert_eq!(
        parse("a;((b)"),
        Err(SyntaxError::UnbalancedParentheses { position: 2 })
    );
}

#[test]
fn test_stray_closing_parenthesis() {
    assert!(matches!(
        parse("a==1)"),
        Err(SyntaxError::UnexpectedToken { position: 4, .. })
    ));
}

#[test]
fn test_unexpected_tokens() {
    for input in ["", "   ", ";", "a;", ",a", "a,,b", "()", "a b", "a(b)", "a==1 2"] {
        assert!(
            matches!(parse(input), Err(SyntaxError::UnexpectedToken { .. })),
            "Expected UnexpectedToken for {:?}, got {:?}",
            input,
            parse(input)
        );
    }
}

#[test]
fn test_lexer_errors_surface_through_parse() {
    assert_eq!(
        parse("a=='x"),
        Err(SyntaxError::UnterminatedString { position: 3 })
    );
}

// ============================================================================
// Depth limits
// ============================================================================

#[test]
fn test_deep_group_nesting_is_bounded() {
    let input = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(
        parse(&input),
        Err(SyntaxError::NestingTooDeep { limit: 128, .. })
    ));
}

#[test]
fn test_long_chains_do_not_count_as_nesting() {
    let input = (0..1000)
        .map(|i| format!("id=={}", i))
        .collect::<Vec<_>>()
        .join(",");

    let ast = parse(&input).unwrap();
    assert_eq!(ast.depth(), 1000);

    let predicate = build(&ast, &PredicateBuilder, &PredicateOptions::default()).unwrap();
    assert!(predicate.matches(&serde_json::json!({"id": 999})));
    assert!(!predicate.matches(&serde_json::json!({"id": 1000})));
}

#[test]
fn test_constraint_count_is_bounded() {
    let config = ParserConfig {
        max_terms: 4,
        ..ParserConfig::default()
    };
    assert!(parse_with("a;b;(c,d)", &config).is_ok());
    assert_eq!(
        parse_with("a;b;(c,d,e)", &config),
        Err(SyntaxError::TooManyTerms { limit: 4, position: 9 })
    );
}

#[test]
fn test_nesting_within_limit() {
    let config = ParserConfig {
        max_depth: 3,
        ..ParserConfig::default()
    };
    assert!(parse_with("(((a)))", &config).is_ok());
    assert!(matches!(
        parse_with("((((a))))", &config),
        Err(SyntaxError::NestingTooDeep { position: 3, .. })
    ));
}

#[test]
fn test_depth_helper() {
    assert_eq!(parse("a").unwrap().depth(), 1);
    assert_eq!(parse("a,b;c").unwrap().depth(), 3);
}

// ============================================================================
// Parser construction
// ============================================================================

#[test]
fn test_parser_from_lexer_and_from_tokens_agree() {
    let input = "a==1;(b,c=gt=2)";
    let from_lexer = Parser::new(Lexer::new(input)).unwrap().parse().unwrap();
    let from_tokens = Parser::from_tokens(tokenize(input).unwrap()).parse().unwrap();
    assert_eq!(from_lexer, from_tokens);
}

#[test]
fn test_from_tokens_rejects_tokens_after_eof() {
    let mut tokens = tokenize("a==1").unwrap();
    tokens.extend(tokenize(";b").unwrap());
    assert_eq!(
        Parser::from_tokens(tokens).parse(),
        Err(SyntaxError::UnexpectedToken {
            found: Token::Semicolon.to_string(),
            position: 0,
        })
    );
}

#[test]
fn test_from_tokens_without_eof() {
    let mut tokens = tokenize("a==1").unwrap();
    tokens.pop();
    assert_eq!(Parser::from_tokens(tokens).parse().unwrap(), eq("a", 1));
}

#[test]
fn test_selectors_in_order() {
    let ast = parse("b==1,(a;c.d=lt=3)").unwrap();
    let names: Vec<String> = ast.selectors().iter().map(|s| s.to_string()).collect();
    assert_eq!(names, vec!["b", "a", "c.d"]);
}
