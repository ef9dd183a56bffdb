//! Operator semantics shared by the evaluator and the VM.
//!
//! Numbers follow the usual dynamic-language rules: `bool` behaves as an
//! integer in arithmetic, mixing `int` and `float` promotes to `float`, `/`
//! always produces a `float`, and `//` and `%` round toward negative
//! infinity. Integer arithmetic is checked and reports overflow instead of
//! wrapping.

use core::cmp::Ordering;
use std::sync::Arc;

use super::methods::{BoundMethod, Method};
use super::slice::slice_positions;
use super::Value;
use crate::ast::{BinaryOp, ComparisonOp, UnaryOp};
use crate::evaluator::RuntimeError;

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn as_number(value: &Value) -> Option<Number> {
    match value {
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn type_name(value: &Value) -> String {
    value.type_name().to_string()
}

// ============================================================================
// Equality and ordering
// ============================================================================

/// Structural equality. Numbers compare by value across `bool`, `int` and
/// `float`; callables and host objects compare by identity.
pub fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(x, y)| equals(x, y))
        }
        (Value::Dict(x), Value::Dict(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, value)| {
                    y.iter()
                        .find(|(k, _)| equals(k, key))
                        .is_some_and(|(_, v)| equals(v, value))
                })
        }
        (Value::Function(x), Value::Function(y)) => Arc::ptr_eq(x, y),
        (Value::Method(x), Value::Method(y)) => {
            x.method() == y.method() && equals(x.receiver(), y.receiver())
        }
        (Value::Object(x), Value::Object(y)) => {
            core::ptr::addr_eq(Arc::as_ptr(x), Arc::as_ptr(y))
        }
        _ => match (as_number(a), as_number(b)) {
            (Some(Number::Int(x)), Some(Number::Int(y))) => x == y,
            (Some(x), Some(y)) => x.to_f64() == y.to_f64(),
            _ => false,
        },
    }
}

/// Ordering between two values, `None` when they are unordered (NaN).
fn ordering(op: ComparisonOp, a: &Value, b: &Value) -> Result<Option<Ordering>, RuntimeError> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Some(x.cmp(y))),
        (Value::List(x), Value::List(y)) => {
            for (x, y) in x.iter().zip(y.iter()) {
                if !equals(x, y) {
                    return ordering(op, x, y);
                }
            }
            Ok(Some(x.len().cmp(&y.len())))
        }
        _ => match (as_number(a), as_number(b)) {
            (Some(Number::Int(x)), Some(Number::Int(y))) => Ok(Some(x.cmp(&y))),
            (Some(x), Some(y)) => Ok(x.to_f64().partial_cmp(&y.to_f64())),
            _ => Err(RuntimeError::NotComparable {
                op: op.as_str(),
                left: type_name(a),
                right: type_name(b),
            }),
        },
    }
}

pub fn compare(op: ComparisonOp, a: &Value, b: &Value) -> Result<Value, RuntimeError> {
    let result = match op {
        ComparisonOp::Eq => equals(a, b),
        ComparisonOp::NotEq => !equals(a, b),
        _ => match ordering(op, a, b)? {
            None => false,
            Some(ord) => match op {
                ComparisonOp::Greater => ord == Ordering::Greater,
                ComparisonOp::Less => ord == Ordering::Less,
                ComparisonOp::GreaterEq => ord != Ordering::Less,
                ComparisonOp::LessEq => ord != Ordering::Greater,
                ComparisonOp::Eq | ComparisonOp::NotEq => unreachable!(),
            },
        },
    };
    Ok(Value::Bool(result))
}

// ============================================================================
// Arithmetic
// ============================================================================

pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, RuntimeError> {
    let bad_operand = || RuntimeError::BadOperand {
        op: op.as_str(),
        operand: type_name(operand),
    };
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match as_number(operand).ok_or_else(bad_operand)? {
            Number::Int(i) => i
                .checked_neg()
                .map(Value::Int)
                .ok_or(RuntimeError::IntegerOverflow { op: "-" }),
            Number::Float(f) => Ok(Value::Float(-f)),
        },
        UnaryOp::Pos => match as_number(operand).ok_or_else(bad_operand)? {
            Number::Int(i) => Ok(Value::Int(i)),
            Number::Float(f) => Ok(Value::Float(f)),
        },
    }
}

pub fn binary(op: BinaryOp, a: &Value, b: &Value) -> Result<Value, RuntimeError> {
    match (op, a, b) {
        (BinaryOp::Add, Value::Str(x), Value::Str(y)) => {
            let mut joined = String::with_capacity(x.len() + y.len());
            joined.push_str(x);
            joined.push_str(y);
            Ok(Value::from(joined))
        }
        (BinaryOp::Add, Value::List(x), Value::List(y)) => {
            Ok(Value::list(x.iter().chain(y.iter()).cloned()))
        }
        (BinaryOp::Mul, Value::Str(s), n) | (BinaryOp::Mul, n, Value::Str(s))
            if repeat_count(n).is_some() =>
        {
            let count = repeat_count(n).unwrap_or(0);
            checked_repeat_len("str", s.len(), count)?;
            Ok(Value::from(s.repeat(count)))
        }
        (BinaryOp::Mul, Value::List(items), n) | (BinaryOp::Mul, n, Value::List(items))
            if repeat_count(n).is_some() =>
        {
            let count = repeat_count(n).unwrap_or(0);
            checked_repeat_len("list", items.len(), count)?;
            Ok(Value::list(
                core::iter::repeat_n(items.iter(), count).flatten().cloned(),
            ))
        }
        _ => {
            let (Some(x), Some(y)) = (as_number(a), as_number(b)) else {
                return Err(RuntimeError::UnsupportedOperands {
                    op: op.as_str(),
                    left: type_name(a),
                    right: type_name(b),
                });
            };
            match (x, y) {
                (Number::Int(x), Number::Int(y)) => int_op(op, x, y),
                (x, y) => float_op(op, x.to_f64(), y.to_f64()),
            }
        }
    }
}

/// Repetition count for `str * n` and `list * n`; negative counts repeat
/// zero times.
/// Largest str (in bytes) or list (in items) that `*` will build.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

/// Rejects a repetition before anything is allocated for it.
fn checked_repeat_len(
    type_name: &'static str,
    len: usize,
    count: usize,
) -> Result<usize, RuntimeError> {
    len.checked_mul(count)
        .filter(|&total| total <= MAX_REPEAT_LEN)
        .ok_or(RuntimeError::RepeatTooLarge {
            type_name,
            limit: MAX_REPEAT_LEN,
        })
}

fn repeat_count(value: &Value) -> Option<usize> {
    match value {
        Value::Bool(b) => Some(usize::from(*b)),
        Value::Int(i) => Some(usize::try_from(*i).unwrap_or(0)),
        _ => None,
    }
}

fn int_op(op: BinaryOp, x: i64, y: i64) -> Result<Value, RuntimeError> {
    let overflow = RuntimeError::IntegerOverflow { op: op.as_str() };
    match op {
        BinaryOp::Add => x.checked_add(y).map(Value::Int).ok_or(overflow),
        BinaryOp::Sub => x.checked_sub(y).map(Value::Int).ok_or(overflow),
        BinaryOp::Mul => x.checked_mul(y).map(Value::Int).ok_or(overflow),
        BinaryOp::Div => {
            if y == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Float(x as f64 / y as f64))
        }
        BinaryOp::FloorDiv => {
            if y == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            let quotient = x.checked_div(y).ok_or(overflow)?;
            if x % y != 0 && ((x < 0) != (y < 0)) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        BinaryOp::Mod => {
            if y == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            let remainder = x.checked_rem(y).unwrap_or(0);
            if remainder != 0 && ((remainder < 0) != (y < 0)) {
                Ok(Value::Int(remainder + y))
            } else {
                Ok(Value::Int(remainder))
            }
        }
        BinaryOp::Pow => {
            if y < 0 {
                if x == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                return Ok(Value::Float((x as f64).powf(y as f64)));
            }
            u32::try_from(y)
                .ok()
                .and_then(|y| x.checked_pow(y))
                .map(Value::Int)
                .ok_or(overflow)
        }
    }
}

fn float_op(op: BinaryOp, x: f64, y: f64) -> Result<Value, RuntimeError> {
    let result = match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => {
            if y == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            x / y
        }
        BinaryOp::FloorDiv => {
            if y == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            (x / y).floor()
        }
        BinaryOp::Mod => {
            if y == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            let remainder = x % y;
            if remainder != 0.0 && ((remainder < 0.0) != (y < 0.0)) {
                remainder + y
            } else {
                remainder
            }
        }
        BinaryOp::Pow => {
            if x == 0.0 && y < 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            x.powf(y)
        }
    };
    Ok(Value::Float(result))
}

// ============================================================================
// Attributes, items and slices
// ============================================================================

/// Attribute lookup. Host objects answer for themselves; built-in values
/// expose their methods as bound callables.
pub fn get_attr(target: &Value, name: &str) -> Result<Value, RuntimeError> {
    let found = match target {
        Value::Object(object) => object.get_attr(name),
        _ => Method::resolve(target, name)
            .map(|method| Value::Method(Arc::new(BoundMethod::new(target.clone(), method)))),
    };
    found.ok_or_else(|| RuntimeError::AttributeNotFound {
        type_name: type_name(target),
        attr: name.to_string(),
    })
}

fn index_of(target: &Value, key: &Value) -> Result<i64, RuntimeError> {
    match key {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(RuntimeError::InvalidIndex {
            type_name: type_name(target),
            index_type: type_name(key),
        }),
    }
}

/// Resolves a possibly negative index against `len`.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len_i = i64::try_from(len).ok()?;
    let resolved = if index < 0 { index + len_i } else { index };
    if (0..len_i).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

pub fn get_item(target: &Value, key: &Value) -> Result<Value, RuntimeError> {
    let out_of_bounds = |index: i64, len: usize| RuntimeError::IndexOutOfBounds {
        type_name: type_name(target),
        index,
        len,
    };
    match target {
        Value::Str(s) => {
            let index = index_of(target, key)?;
            let len = s.chars().count();
            normalize_index(index, len)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::from(c.to_string()))
                .ok_or_else(|| out_of_bounds(index, len))
        }
        Value::List(items) => {
            let index = index_of(target, key)?;
            normalize_index(index, items.len())
                .map(|i| items[i].clone())
                .ok_or_else(|| out_of_bounds(index, items.len()))
        }
        Value::Dict(_) => target
            .dict_get(key)
            .cloned()
            .ok_or_else(|| RuntimeError::KeyNotFound { key: key.repr() }),
        Value::Object(object) => object.get_item(key),
        _ => Err(RuntimeError::NotSubscriptable {
            type_name: type_name(target),
        }),
    }
}

fn slice_bound(bound: &Value) -> Result<Option<i64>, RuntimeError> {
    match bound {
        Value::None => Ok(None),
        Value::Int(i) => Ok(Some(*i)),
        Value::Bool(b) => Ok(Some(i64::from(*b))),
        other => Err(RuntimeError::InvalidSliceIndex {
            index_type: type_name(other),
        }),
    }
}

/// `target[start:stop:step]`, where `Value::None` stands for an omitted bound.
pub fn get_slice(
    target: &Value,
    start: &Value,
    stop: &Value,
    step: &Value,
) -> Result<Value, RuntimeError> {
    if let Value::Object(object) = target {
        return object.get_slice(start, stop, step);
    }
    let (start, stop) = (slice_bound(start)?, slice_bound(stop)?);
    let step = slice_bound(step)?.unwrap_or(1);
    if step == 0 {
        return Err(RuntimeError::ZeroSliceStep);
    }
    match target {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let sliced: String = slice_positions(chars.len(), start, stop, step)
                .into_iter()
                .map(|i| chars[i])
                .collect();
            Ok(Value::from(sliced))
        }
        Value::List(items) => Ok(Value::list(
            slice_positions(items.len(), start, stop, step)
                .into_iter()
                .map(|i| items[i].clone()),
        )),
        _ => Err(RuntimeError::NotSubscriptable {
            type_name: type_name(target),
        }),
    }
}
