//! Runtime values and the operations both execution engines share.

pub mod function;
pub mod methods;
pub mod object;
pub mod ops;
mod slice;
mod value;

pub use function::{NativeFn, NativeFunction};
pub use methods::{BoundMethod, Method};
pub use object::HostObject;
pub use value::Value;
