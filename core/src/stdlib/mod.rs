//! Default bindings available to every expression.
//!
//! The prelude holds the conversion functions `bool`, `float`, `int` and
//! `str`, plus `None`. It sits underneath the caller's environment: a name
//! the caller binds always shadows the prelude entry of the same name.

use lazy_static::lazy_static;

use crate::api::Bindings;
use crate::values::Value;

pub mod conversions;

lazy_static! {
    static ref PRELUDE: Bindings = [
        ("None", Value::None),
        ("bool", Value::function("bool", None, conversions::to_bool)),
        ("float", Value::function("float", None, conversions::to_float)),
        ("int", Value::function("int", None, conversions::to_int)),
        ("str", Value::function("str", None, conversions::to_str)),
    ]
    .into_iter()
    .collect();
}

/// The shared, immutable prelude.
pub fn prelude() -> &'static Bindings {
    &PRELUDE
}
