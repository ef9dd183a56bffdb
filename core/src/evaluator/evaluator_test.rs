//! Tests for the tree-walking evaluator.

use std::sync::{Arc, Mutex};

use crate::{
    api::Bindings,
    evaluator::{ErrorKind, Evaluator, RuntimeError},
    parser,
    values::Value,
};

fn test_env() -> Bindings {
    [
        ("x", Value::Int(10)),
        ("name", Value::from("Ada")),
        (
            "items",
            Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]),
        ),
        (
            "scores",
            Value::dict([(Value::from("a"), Value::Int(1)), (Value::from("b"), Value::Int(2))]),
        ),
        (
            "boom",
            Value::function("boom", None, |_| Err(RuntimeError::host("boom"))),
        ),
        (
            "add",
            Value::function("add", Some(2), |args| {
                crate::values::ops::binary(crate::ast::BinaryOp::Add, &args[0], &args[1])
            }),
        ),
    ]
    .into_iter()
    .collect()
}

fn eval(source: &str) -> Result<Value, RuntimeError> {
    let expr = parser::parse(source).unwrap();
    Evaluator::new(&test_env()).eval(&expr)
}

#[test]
fn test_literals() {
    assert_eq!(eval("42").unwrap(), Value::Int(42));
    assert_eq!(eval("2.5").unwrap(), Value::Float(2.5));
    assert_eq!(eval("'hi'").unwrap(), Value::from("hi"));
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(eval("1 + 2 * 3").unwrap(), Value::Int(7));
    assert_eq!(eval("(1 + 2) * 3").unwrap(), Value::Int(9));
    assert_eq!(eval("2 ** 3 ** 2").unwrap(), Value::Int(512));
    assert_eq!(eval("-2 ** 2").unwrap(), Value::Int(-4));
    assert_eq!(eval("7 // 2 + 7 % 2").unwrap(), Value::Int(4));
}

#[test]
fn test_references() {
    assert_eq!(eval("x * 2").unwrap(), Value::Int(20));
    let err = eval("missing + 1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert_eq!(err.to_string(), "name 'missing' is not defined");
}

#[test]
fn test_boolean_operators_return_operands() {
    assert_eq!(eval("0 || 'fallback'").unwrap(), Value::from("fallback"));
    assert_eq!(eval("'first' || 'second'").unwrap(), Value::from("first"));
    assert_eq!(eval("'' && 'never'").unwrap(), Value::from(""));
    assert_eq!(eval("1 && 2").unwrap(), Value::Int(2));
}

#[test]
fn test_boolean_operators_short_circuit() {
    assert_eq!(eval("1 || boom()").unwrap(), Value::Int(1));
    assert_eq!(eval("0 && boom()").unwrap(), Value::Int(0));
    assert_eq!(eval("0 || boom()").unwrap_err(), RuntimeError::host("boom"));
}

#[test]
fn test_ternary_evaluates_one_branch() {
    assert_eq!(eval("x > 5 ? 'big' : boom()").unwrap(), Value::from("big"));
    assert_eq!(eval("x < 5 ? boom() : 'small'").unwrap(), Value::from("small"));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("1 < 2").unwrap(), Value::Bool(true));
    assert_eq!(eval("'a' == 'a'").unwrap(), Value::Bool(true));
    assert_eq!(eval("1 == 1.0").unwrap(), Value::Bool(true));
    assert_eq!(eval("!(x >= 10)").unwrap(), Value::Bool(false));
    assert_eq!(eval("'a' < 1").unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_host_function_calls() {
    assert_eq!(eval("add(1, 2)").unwrap(), Value::Int(3));
    assert_eq!(eval("add('a', 'b')").unwrap(), Value::from("ab"));
    let err = eval("add(1)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(eval("x()").unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_host_error_passes_through_unchanged() {
    assert_eq!(eval("boom(1, 2)").unwrap_err(), RuntimeError::host("boom"));
}

#[test]
fn test_methods() {
    assert_eq!(eval("name.upper()").unwrap(), Value::from("ADA"));
    assert_eq!(eval("'a,b'.split(',')").unwrap(), Value::list([Value::from("a"), Value::from("b")]));
    assert_eq!(eval("scores.get('z', 0)").unwrap(), Value::Int(0));
    assert_eq!(eval("name.nope").unwrap_err().kind(), ErrorKind::Attribute);
}

#[test]
fn test_indexing() {
    assert_eq!(eval("items[0]").unwrap(), Value::Int(1));
    assert_eq!(eval("items[-1]").unwrap(), Value::Int(3));
    assert_eq!(eval("name[1]").unwrap(), Value::from("d"));
    assert_eq!(eval("scores['b']").unwrap(), Value::Int(2));
    assert_eq!(eval("items[3]").unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(eval("scores['z']").unwrap_err().kind(), ErrorKind::Key);
    assert_eq!(eval("x[0]").unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_slicing() {
    assert_eq!(eval("'hello'[1:-1]").unwrap(), Value::from("ell"));
    assert_eq!(eval("'hello'[::-1]").unwrap(), Value::from("olleh"));
    assert_eq!(eval("'hello'[:2]").unwrap(), Value::from("he"));
    assert_eq!(eval("items[1:]").unwrap(), Value::list([Value::Int(2), Value::Int(3)]));
    assert_eq!(eval("items[::0]").unwrap_err(), RuntimeError::ZeroSliceStep);
}

#[test]
fn test_operands_evaluate_left_to_right() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = {
        let log = Arc::clone(&log);
        Value::function("rec", Some(1), move |args| {
            log.lock().unwrap().push(args[0].clone());
            Ok(args[0].clone())
        })
    };
    let env: Bindings = [("rec", recorder)].into_iter().collect();

    let expr = parser::parse("rec(1) + rec(2) * rec(3)").unwrap();
    assert_eq!(Evaluator::new(&env).eval(&expr).unwrap(), Value::Int(7));
    assert_eq!(
        *log.lock().unwrap(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );

    // The callee is evaluated before its arguments, even when it then
    // fails to be callable.
    log.lock().unwrap().clear();
    let expr = parser::parse("rec(1)(rec(2))").unwrap();
    let err = Evaluator::new(&env).eval(&expr).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(*log.lock().unwrap(), vec![Value::Int(1), Value::Int(2)]);
}
