use pretty_assertions::assert_eq;

use super::*;
use crate::syntax::Span;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn op(op: Operator) -> TokenKind {
    TokenKind::Operator(op)
}

#[test]
fn test_identifiers_and_literals() {
    assert_eq!(
        kinds("foo _bar9 42 16.5 2. 'x'"),
        vec![
            TokenKind::Identifier("foo".into()),
            TokenKind::Identifier("_bar9".into()),
            TokenKind::Int(42),
            TokenKind::Float(16.5),
            TokenKind::Float(2.0),
            TokenKind::Str("x".into()),
        ]
    );
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(
        kinds("a**b//c>=d!=e&&f||!g"),
        vec![
            TokenKind::Identifier("a".into()),
            op(Operator::Pow),
            TokenKind::Identifier("b".into()),
            op(Operator::FloorDiv),
            TokenKind::Identifier("c".into()),
            op(Operator::GreaterEq),
            TokenKind::Identifier("d".into()),
            op(Operator::NotEq),
            TokenKind::Identifier("e".into()),
            op(Operator::And),
            TokenKind::Identifier("f".into()),
            op(Operator::Or),
            op(Operator::Not),
            TokenKind::Identifier("g".into()),
        ]
    );
}

#[test]
fn test_spans_cover_source_characters() {
    let tokens = tokenize("  ab == 'c d'").unwrap();
    let spans: Vec<Span> = tokens.into_iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(2, 4), Span::new(5, 7), Span::new(8, 13)]
    );
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    let tokens = tokenize("'é' + x").unwrap();
    assert_eq!(tokens[1].offset(), 4);
    assert_eq!(tokens[2].offset(), 6);
}

#[test]
fn test_escaped_quote_does_not_terminate_string() {
    assert_eq!(kinds(r"'foo\'s'"), vec![TokenKind::Str("foo's".into())]);
    assert_eq!(kinds(r#""say \"hi\"""#), vec![TokenKind::Str("say \"hi\"".into())]);
}

#[test]
fn test_other_backslashes_are_kept() {
    assert_eq!(kinds(r"'a\nb'"), vec![TokenKind::Str(r"a\nb".into())]);
    assert_eq!(kinds(r#"'a\"b'"#), vec![TokenKind::Str(r#"a\"b"#.into())]);
}

#[test]
fn test_other_quote_kind_is_plain_text() {
    assert_eq!(kinds(r#""it's""#), vec![TokenKind::Str("it's".into())]);
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    let err = tokenize("1 + 'foo").unwrap_err();
    assert_eq!(err.message(), "Unexpected EOF while parsing");
    assert_eq!(err.offsets(), &[4]);
}

#[test]
fn test_unterminated_string_aborts_before_invalid_characters() {
    let err = tokenize("$ 'foo").unwrap_err();
    assert_eq!(err.message(), "Unexpected EOF while parsing");
}

#[test]
fn test_invalid_characters_are_aggregated() {
    let err = tokenize("a $ b @ c").unwrap_err();
    assert_eq!(err.message(), "Unexpected tokens encountered during lexing");
    assert_eq!(err.offsets(), &[2, 6]);
}

#[test]
fn test_single_ampersand_is_invalid() {
    let err = tokenize("a & b").unwrap_err();
    assert_eq!(err.offsets(), &[2]);
}

#[test]
fn test_number_consumes_one_dot() {
    assert_eq!(
        kinds("1.2.3"),
        vec![TokenKind::Float(1.2), op(Operator::Dot), TokenKind::Int(3)]
    );
}

#[test]
fn test_integer_overflow_is_a_syntax_error() {
    let err = tokenize("99999999999999999999").unwrap_err();
    assert_eq!(err.message(), "Integer literal is too large");
    assert_eq!(err.offsets().len(), 20);
}

#[test]
fn test_empty_and_blank_sources() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize(" \t\n ").unwrap().is_empty());
}
