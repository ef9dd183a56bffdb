//! Host functions callable from expressions.

use core::fmt;

use super::Value;
use crate::evaluator::RuntimeError;

/// Signature of a native function body.
///
/// Arguments arrive already evaluated, in source order.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync;

/// A named Rust closure exposed as a callable value.
///
/// When `arity` is set, calls with a different number of arguments fail
/// before the body runs.
///
/// # Example
///
/// ```
/// use sel_core::values::NativeFunction;
/// use sel_core::Value;
///
/// let len = NativeFunction::new("len", Some(1), |args| match &args[0] {
///     Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
///     other => Err(sel_core::RuntimeError::host(format!("no len for {}", other.type_name()))),
/// });
/// assert_eq!(len.call(&[Value::from("abc")]).unwrap(), Value::Int(3));
/// assert!(len.call(&[]).is_err());
/// ```
pub struct NativeFunction {
    name: String,
    arity: Option<usize>,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, arity: Option<usize>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        if let Some(expected) = self.arity {
            if expected != args.len() {
                return Err(RuntimeError::ArgumentCount {
                    name: self.name.clone(),
                    expected: expected.to_string(),
                    got: args.len(),
                });
            }
        }
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
