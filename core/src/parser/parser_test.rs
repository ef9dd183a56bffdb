use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{BinaryOp, BoolOp, ComparisonOp, Expr, Literal, Subscript, UnaryOp};
use crate::syntax::SyntaxError;

fn int(value: i64) -> Expr {
    Expr::Literal(Literal::Int(value))
}

fn str_lit(value: &str) -> Expr {
    Expr::Literal(Literal::Str(value.into()))
}

fn var(name: &str) -> Expr {
    Expr::Reference(name.into())
}

fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn ternary(cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::Ternary {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    }
}

fn parse_err(source: &str) -> SyntaxError {
    match parse(source) {
        Ok(expr) => panic!("expected a syntax error for {source:?}, got {expr:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_literals() {
    assert_eq!(parse("16.5").unwrap(), Expr::Literal(Literal::Float(16.5)));
    assert_eq!(parse("2.").unwrap(), Expr::Literal(Literal::Float(2.0)));
    assert_eq!(parse("'foo'").unwrap(), str_lit("foo"));
    assert_eq!(parse(r"'foo\'s'").unwrap(), str_lit("foo's"));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse("1 + 2 * 3").unwrap(),
        bin(BinaryOp::Add, int(1), bin(BinaryOp::Mul, int(2), int(3)))
    );
    assert_eq!(
        parse("1 - 2 - 3").unwrap(),
        bin(BinaryOp::Sub, bin(BinaryOp::Sub, int(1), int(2)), int(3))
    );
}

#[test]
fn test_power_is_right_associative_and_binds_tighter_than_unary() {
    assert_eq!(
        parse("2 ** 3 ** 2").unwrap(),
        bin(BinaryOp::Pow, int(2), bin(BinaryOp::Pow, int(3), int(2)))
    );
    assert_eq!(
        parse("-2 ** 2").unwrap(),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(bin(BinaryOp::Pow, int(2), int(2))),
        }
    );
}

#[test]
fn test_not_is_looser_than_comparison() {
    assert_eq!(
        parse("!a == b").unwrap(),
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(Expr::Comparison {
                op: ComparisonOp::Eq,
                left: Box::new(var("a")),
                right: Box::new(var("b")),
            }),
        }
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse("a || b && c").unwrap(),
        Expr::Boolean {
            op: BoolOp::Or,
            left: Box::new(var("a")),
            right: Box::new(Expr::Boolean {
                op: BoolOp::And,
                left: Box::new(var("b")),
                right: Box::new(var("c")),
            }),
        }
    );
}

#[test]
fn test_ternary_nests_in_both_branches() {
    assert_eq!(
        parse("1 ? 1 ? 2 : 3 : 4").unwrap(),
        ternary(int(1), ternary(int(1), int(2), int(3)), int(4))
    );
    assert_eq!(
        parse("0 ? 1 : 2 ? 3 : 4").unwrap(),
        ternary(int(0), int(1), ternary(int(2), int(3), int(4)))
    );
}

#[test]
fn test_postfix_chain_in_any_order() {
    let expr = parse("f(1)[0].x(2, 'y')").unwrap();
    let expected = Expr::Call {
        callee: Box::new(Expr::Accessor {
            operand: Box::new(Expr::Index {
                operand: Box::new(Expr::Call {
                    callee: Box::new(var("f")),
                    args: vec![int(1)],
                }),
                subscript: Subscript::Item(Box::new(int(0))),
            }),
            attr: "x".into(),
        }),
        args: vec![int(2), str_lit("y")],
    };
    assert_eq!(expr, expected);
}

#[test]
fn test_slices() {
    let slice = |source: &str| match parse(source).unwrap() {
        Expr::Index {
            subscript: Subscript::Slice { start, stop, step },
            ..
        } => (start.is_some(), stop.is_some(), step.is_some()),
        other => panic!("not a slice: {other:?}"),
    };
    assert_eq!(slice("s[:]"), (false, false, false));
    assert_eq!(slice("s[1:]"), (true, false, false));
    assert_eq!(slice("s[:2]"), (false, true, false));
    assert_eq!(slice("s[::-1]"), (false, false, true));
    assert_eq!(slice("s[4:1:-1]"), (true, true, true));
    assert_eq!(slice("s[1::]"), (true, false, false));
}

#[test]
fn test_empty_call() {
    assert_eq!(
        parse("f()").unwrap(),
        Expr::Call {
            callee: Box::new(var("f")),
            args: vec![],
        }
    );
}

#[test]
fn test_parse_is_deterministic() {
    let source = "a.b(c[1:2], d ? e : -f ** 2) || !g >= 3";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn test_display_round_trips() {
    for source in [
        "a.b(c[1:2], d ? e : -f ** 2) || !g >= 3",
        "'it\\'s'[::-1].upper()",
        "(x + 1) * 2 // 3 % 4 / 5",
        "f()[0](1)",
        "(-x) ** 2 + (!y)",
        "(1).bit + 0.000001 + 100000000000000000000.0",
    ] {
        let expr = parse(source).unwrap();
        assert_eq!(parse(&expr.to_string()).unwrap(), expr, "{source}");
    }
}

#[test]
fn test_empty_index_expects_subscript() {
    let err = parse_err("'foo'[]");
    assert_eq!(err.message(), "Expected 'expr | :' was not found");
    assert_eq!(err.offsets(), &[5]);
}

#[test]
fn test_unclosed_paren() {
    let err = parse_err("(1 + 2");
    assert_eq!(err.message(), "Expected ')' was not found");
    assert_eq!(err.offsets(), &[5]);
}

#[test]
fn test_missing_right_operand() {
    let err = parse_err("1 +");
    assert_eq!(err.message(), "Expected 'expr' was not found");
    assert_eq!(err.offsets(), &[2]);
}

#[test]
fn test_missing_colon() {
    let err = parse_err("a ? b");
    assert_eq!(err.message(), "Expected ':' was not found");
    assert_eq!(err.offsets(), &[4]);
}

#[test]
fn test_accessor_requires_identifier() {
    let err = parse_err("a.1");
    assert_eq!(err.message(), "Expected 'identifier' was not found");
    assert_eq!(err.offsets(), &[1]);
}

#[test]
fn test_too_many_slice_slots() {
    let err = parse_err("s[1:2:3:4]");
    assert_eq!(err.message(), "Expected ']' was not found");
}

#[test]
fn test_trailing_comma_in_call() {
    let err = parse_err("f(1,)");
    assert_eq!(err.message(), "Expected 'expr' was not found");
}

#[test]
fn test_trailing_tokens_are_unexpected() {
    let err = parse_err("1 2");
    assert_eq!(err.message(), "Unexpected token encountered while parsing");
    assert_eq!(err.offsets(), &[2]);
}

#[test]
fn test_unexpected_token_spans_whole_token() {
    let err = parse_err("1 foo");
    assert_eq!(err.offsets(), &[2, 3, 4]);
}

#[test]
fn test_empty_source() {
    let err = parse_err("");
    assert_eq!(err.message(), "Unexpected token encountered while parsing");
    assert_eq!(err.offsets(), &[0]);
}

#[test]
fn test_leading_operator() {
    let err = parse_err("* 2");
    assert_eq!(err.message(), "Unexpected token encountered while parsing");
    assert_eq!(err.offsets(), &[0]);
}

#[test]
fn test_repeated_unary_is_rejected() {
    let err = parse_err("--1");
    assert_eq!(err.message(), "Expected 'expr' was not found");
    let err = parse_err("!!x");
    assert_eq!(err.message(), "Expected 'expr' was not found");
}

#[test]
fn test_unterminated_string_surfaces_lex_error() {
    let err = parse_err("'foo");
    assert_eq!(err.message(), "Unexpected EOF while parsing");
    assert_eq!(err.offsets(), &[0]);
}

#[test]
fn test_nesting_limit() {
    let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert!(parse_with_max_depth(&source, 32).is_ok());
    let err = parse_with_max_depth(&source, 8).unwrap_err();
    assert_eq!(
        err.message(),
        "Expression nesting depth exceeds maximum of 8 levels"
    );
}

#[test]
fn test_power_chain_counts_toward_nesting_limit() {
    let source = vec!["2"; 50].join(" ** ");
    assert!(parse_with_max_depth(&source, 16).is_err());
    assert!(parse(&source).is_ok());
}

#[test]
fn test_left_associative_chain_counts_toward_nesting_limit() {
    let source = vec!["a"; 20].join(" + ");
    assert!(parse_with_max_depth(&source, 32).is_ok());
    let err = parse_with_max_depth(&source, 8).unwrap_err();
    assert_eq!(
        err.message(),
        "Expression nesting depth exceeds maximum of 8 levels"
    );

    let accessors = format!("a{}", ".b".repeat(20));
    assert!(parse_with_max_depth(&accessors, 32).is_ok());
    assert!(parse_with_max_depth(&accessors, 8).is_err());
}
