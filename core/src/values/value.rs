use core::fmt;
use std::sync::Arc;

use super::function::NativeFunction;
use super::methods::BoundMethod;
use super::object::HostObject;
use super::ops;
use crate::evaluator::RuntimeError;

/// A runtime value.
///
/// Values are cheap to clone: strings, containers and callables are shared
/// behind [`Arc`], so a value can be bound in many environments and cached
/// as a constant in compiled code at once.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<[Value]>),
    /// Key/value pairs in insertion order; keys are unique by equality.
    Dict(Arc<[(Value, Value)]>),
    Function(Arc<NativeFunction>),
    Method(Arc<BoundMethod>),
    Object(Arc<dyn HostObject>),
}

impl Value {
    pub fn str(value: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(value.as_ref()))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Builds a dict; a repeated key keeps its first position and last value.
    pub fn dict(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        for (key, value) in pairs {
            match entries.iter_mut().find(|(k, _)| ops::equals(k, &key)) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Value::Dict(entries.into())
    }

    /// Wraps a Rust closure as a callable value.
    ///
    /// # Example
    ///
    /// ```
    /// use sel_core::Value;
    ///
    /// let add = Value::function("add", Some(2), |args| {
    ///     sel_core::values::ops::binary(sel_core::ast::BinaryOp::Add, &args[0], &args[1])
    /// });
    /// let sum = add.call(&[Value::Int(1), Value::Int(2)]).unwrap();
    /// assert_eq!(sum, Value::Int(3));
    /// ```
    pub fn function<F>(name: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        Value::Function(Arc::new(NativeFunction::new(name, arity, func)))
    }

    pub fn object(object: impl HostObject + 'static) -> Self {
        Value::Object(Arc::new(object))
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Function(_) => "builtin_function",
            Value::Method(_) => "builtin_method",
            Value::Object(object) => object.type_name(),
        }
    }

    /// Truthiness: `None`, `false`, zero, and empty strings or containers are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Dict(entries) => !entries.is_empty(),
            Value::Function(_) | Value::Method(_) => true,
            Value::Object(object) => object.is_truthy(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(&**items),
            _ => None,
        }
    }

    /// Looks up `key` in a dict value.
    pub fn dict_get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Dict(entries) => entries
                .iter()
                .find(|(k, _)| ops::equals(k, key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Invokes a callable value with positional arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        match self {
            Value::Function(function) => function.call(args),
            Value::Method(method) => method.call(args),
            Value::Object(object) => object.call(args),
            other => Err(RuntimeError::NotCallable {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    /// The source-like rendering: strings are quoted, floats always show a
    /// fractional part or exponent.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => crate::syntax::quoted(s),
            other => other.to_string(),
        }
    }
}

fn format_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("nan")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "inf" } else { "-inf" })
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value:?}")
    }
}

/// The plain rendering used by `str()`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => format_float(*x, f),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&item.repr())?;
                }
                f.write_str("]")
            }
            Value::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key.repr(), value.repr())?;
                }
                f.write_str("}")
            }
            Value::Function(function) => write!(f, "<built-in function {}>", function.name()),
            Value::Method(method) => write!(
                f,
                "<built-in method {} of {} object>",
                method.name(),
                method.receiver().type_name()
            ),
            Value::Object(object) => f.write_str(&object.repr()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        ops::equals(self, other)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::str(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}
