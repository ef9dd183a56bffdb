//! Conversion functions: `bool(x)`, `float(x)`, `int(x)`, `str(x)`.
//!
//! Each accepts zero arguments (returning the type's empty value) or one.

use crate::evaluator::RuntimeError;
use crate::values::Value;

// ============================================================================
// Argument Handling
// ============================================================================

/// The single optional argument of a conversion.
fn optional_arg<'a>(name: &str, args: &'a [Value]) -> Result<Option<&'a Value>, RuntimeError> {
    match args {
        [] => Ok(None),
        [value] => Ok(Some(value)),
        _ => Err(RuntimeError::ArgumentCount {
            name: name.to_string(),
            expected: "0 or 1".to_string(),
            got: args.len(),
        }),
    }
}

fn wrong_type(function: &str, expected: &'static str, found: &Value) -> RuntimeError {
    RuntimeError::ArgumentType {
        function: function.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

// ============================================================================
// Conversions
// ============================================================================

pub fn to_bool(args: &[Value]) -> Result<Value, RuntimeError> {
    let value = optional_arg("bool", args)?;
    Ok(Value::Bool(value.is_some_and(Value::is_truthy)))
}

pub fn to_str(args: &[Value]) -> Result<Value, RuntimeError> {
    match optional_arg("str", args)? {
        None => Ok(Value::str("")),
        Some(value @ Value::Str(_)) => Ok(value.clone()),
        Some(value) => Ok(Value::from(value.to_string())),
    }
}

pub fn to_int(args: &[Value]) -> Result<Value, RuntimeError> {
    let Some(value) = optional_arg("int", args)? else {
        return Ok(Value::Int(0));
    };
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => float_to_int(*f).map(Value::Int),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::InvalidLiteral {
                function: "int",
                literal: value.repr(),
            }),
        other => Err(wrong_type("int", "a string or a number", other)),
    }
}

/// Truncates toward zero; NaN, infinities and out-of-range values fail.
fn float_to_int(f: f64) -> Result<i64, RuntimeError> {
    // 2^63 is exactly representable; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return Err(RuntimeError::InvalidValue {
            message: "cannot convert float NaN to integer".to_string(),
        });
    }
    if f.is_infinite() {
        return Err(RuntimeError::InvalidValue {
            message: "cannot convert float infinity to integer".to_string(),
        });
    }
    let truncated = f.trunc();
    if !(-LIMIT..LIMIT).contains(&truncated) {
        return Err(RuntimeError::IntegerOverflow { op: "int()" });
    }
    Ok(truncated as i64)
}

pub fn to_float(args: &[Value]) -> Result<Value, RuntimeError> {
    let Some(value) = optional_arg("float", args)? else {
        return Ok(Value::Float(0.0));
    };
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(f64::from(u8::from(*b)))),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| RuntimeError::InvalidLiteral {
                function: "float",
                literal: value.repr(),
            }),
        other => Err(wrong_type("float", "a string or a number", other)),
    }
}
