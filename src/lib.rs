//! Sel - a small, embeddable expression language
//!
//! # Overview
//!
//! Sel evaluates single expressions written in a familiar syntax against
//! values supplied by the host application. Typical uses:
//!
//! - Filters and routing rules
//! - Feature flags and conditional logic
//! - Templated labels and small data transformations
//!
//! An expression is parsed once, lowered to bytecode on first use, and can
//! then be evaluated any number of times, from any number of threads.
//!
//! # Quick Start
//!
//! ```
//! use sel::{EnvironmentBuilder, EvalMode, Expression, Value};
//!
//! let env = EnvironmentBuilder::new()
//!     .bind("price", 120)
//!     .bind("currency", "eur")
//!     .build()
//!     .unwrap();
//!
//! let expr = Expression::new("price > 100 ? str(price * 0.9) + ' ' + currency.upper() : 'n/a'");
//! let label = expr.evaluate(&env, EvalMode::default()).unwrap();
//! assert_eq!(label, Value::from("108.0 EUR"));
//! ```
//!
//! # Host Functions
//!
//! Native Rust closures become callable values:
//!
//! ```
//! use sel::{EnvironmentBuilder, EvalMode, Expression, RuntimeError, Value};
//!
//! let add = Value::function("add", Some(2), |args| match (&args[0], &args[1]) {
//!     (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
//!     _ => Err(RuntimeError::host("add() expects two ints")),
//! });
//! let env = EnvironmentBuilder::new().bind("add", add).build().unwrap();
//!
//! let expr = Expression::new("add(40, 2)");
//! assert_eq!(expr.evaluate(&env, EvalMode::Bytecode).unwrap(), Value::Int(42));
//! ```

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

// Re-export public API from sel_core
pub use sel_core::api::{
    Bindings, CompileOptions, Environment, EnvironmentBuilder, Error, EvalMode, Expression,
};
pub use sel_core::evaluator::{ErrorKind, RuntimeError};
pub use sel_core::syntax::SyntaxError;
pub use sel_core::values::{self, HostObject, NativeFunction, Value};
