use super::Value;
use crate::evaluator::RuntimeError;

/// A host-defined value exposed to expressions.
///
/// Every hook has a default that fails the way a plain value would, so an
/// implementation only overrides the capabilities it supports. Errors
/// returned from the hooks reach the caller unchanged.
///
/// # Example
///
/// ```
/// use sel_core::values::HostObject;
/// use sel_core::Value;
///
/// struct Point { x: i64, y: i64 }
///
/// impl HostObject for Point {
///     fn type_name(&self) -> &str { "Point" }
///
///     fn get_attr(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(Value::Int(self.x)),
///             "y" => Some(Value::Int(self.y)),
///             _ => None,
///         }
///     }
/// }
///
/// let point = Value::object(Point { x: 1, y: 2 });
/// assert_eq!(sel_core::values::ops::get_attr(&point, "y").unwrap(), Value::Int(2));
/// ```
pub trait HostObject: Send + Sync {
    fn type_name(&self) -> &str;

    /// Attribute lookup; `None` reports a missing attribute.
    fn get_attr(&self, _name: &str) -> Option<Value> {
        None
    }

    fn call(&self, _args: &[Value]) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotCallable {
            type_name: self.type_name().to_string(),
        })
    }

    fn get_item(&self, _key: &Value) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotSubscriptable {
            type_name: self.type_name().to_string(),
        })
    }

    /// `object[start:stop:step]`. Omitted bounds arrive as `Value::None` and
    /// the bounds are passed through unchecked.
    fn get_slice(
        &self,
        _start: &Value,
        _stop: &Value,
        _step: &Value,
    ) -> Result<Value, RuntimeError> {
        Err(RuntimeError::NotSubscriptable {
            type_name: self.type_name().to_string(),
        })
    }

    fn is_truthy(&self) -> bool {
        true
    }

    fn repr(&self) -> String {
        format!("<{} object>", self.type_name())
    }
}
