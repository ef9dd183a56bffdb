//! Property-based tests for engine agreement.
//!
//! Random side-effect-free expressions are evaluated by the tree walker and
//! by the bytecode VM; both must produce the same value or the same error.

use proptest::prelude::*;
use sel_core::{Bindings, EvalMode, Expression, Value, parser};

// -- Expression Strategies --

fn int_literal() -> impl Strategy<Value = String> {
    (-3i64..12).prop_map(|n| if n < 0 { format!("({n})") } else { n.to_string() })
}

fn float_literal() -> impl Strategy<Value = String> {
    prop_oneof![Just("0.5"), Just("2."), Just("1.25"), Just("0.0"), Just("3.0")]
        .prop_map(str::to_string)
}

fn str_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("''"),
        Just("'ab'"),
        Just("'Hello'"),
        Just("\"x y\""),
        Just(r"'it\'s'"),
        Just("' pad '"),
    ]
    .prop_map(str::to_string)
}

/// Numeric expressions. Every compound is parenthesized so the generator
/// never has to reason about precedence.
fn num_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        4 => int_literal(),
        2 => float_literal(),
        2 => prop_oneof![Just("x"), Just("y"), Just("flag")].prop_map(str::to_string),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        let binary_op = prop_oneof![
            Just("+"),
            Just("-"),
            Just("*"),
            Just("/"),
            Just("//"),
            Just("%"),
            Just("**"),
            Just("=="),
            Just("!="),
            Just("<"),
            Just(">="),
            Just("&&"),
            Just("||"),
        ];
        prop_oneof![
            4 => (inner.clone(), binary_op, inner.clone())
                .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
            1 => (prop_oneof![Just("-"), Just("+"), Just("!")], inner.clone())
                .prop_map(|(op, e)| format!("({op}({e}))")),
            1 => (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("({c} ? {t} : {e})")),
            1 => (prop_oneof![Just("int"), Just("float"), Just("bool")], inner)
                .prop_map(|(f, e)| format!("{f}({e})")),
        ]
    })
}

/// String expressions. Repetition is left out so sizes stay small.
fn str_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        3 => str_literal(),
        1 => Just("s".to_string()),
        1 => num_expr().prop_map(|e| format!("str({e})")),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        let method = prop_oneof![
            Just("upper()"),
            Just("lower()"),
            Just("strip()"),
            Just("title()"),
            Just("capitalize()"),
        ];
        prop_oneof![
            3 => (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l} + {r})")),
            2 => (inner.clone(), method).prop_map(|(e, m)| format!("({e}).{m}")),
            2 => (inner.clone(), int_literal()).prop_map(|(e, i)| format!("({e})[{i}]")),
            2 => (
                inner.clone(),
                prop::option::of(int_literal()),
                prop::option::of(int_literal()),
                prop::option::of(int_literal()),
            )
                .prop_map(|(e, start, stop, step)| {
                    let part = |bound: Option<String>| bound.unwrap_or_default();
                    match step {
                        Some(step) => format!("({e})[{}:{}:{step}]", part(start), part(stop)),
                        None => format!("({e})[{}:{}]", part(start), part(stop)),
                    }
                }),
            1 => (num_expr(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("({c} ? {t} : {e})")),
            1 => (inner.clone(), inner).prop_map(|(l, r)| format!("({l} || {r})")),
        ]
    })
}

fn any_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => num_expr(),
        3 => str_expr(),
        1 => (str_expr(), prop_oneof![Just("=="), Just("<"), Just(">=")], str_expr())
            .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
        // Mixed operands exercise the error paths.
        1 => (num_expr(), str_expr()).prop_map(|(l, r)| format!("({l} + {r})")),
    ]
}

fn env() -> Bindings {
    [
        ("x", Value::Int(7)),
        ("y", Value::Float(-2.5)),
        ("flag", Value::Bool(true)),
        ("s", Value::from("Sel Lang")),
    ]
    .into_iter()
    .collect()
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn tree_walk_and_vm_agree(source in any_expr()) {
        let expr = Expression::new(source.as_str());
        let env = env();
        let tree = expr.evaluate(&env, EvalMode::TreeWalk);
        let vm = expr.evaluate(&env, EvalMode::Bytecode);
        // Compared through Debug so NaN results match themselves.
        prop_assert_eq!(format!("{tree:?}"), format!("{vm:?}"), "source: {}", source);
    }

    #[test]
    fn generated_expressions_parse(source in any_expr()) {
        prop_assert!(parser::parse(&source).is_ok(), "failed to parse {}", source);
    }

    #[test]
    fn parse_is_idempotent_through_display(source in any_expr()) {
        let first = parser::parse(&source).unwrap();
        let second = parser::parse(&first.to_string()).unwrap();
        prop_assert_eq!(first, second);
    }
}
