//! Public API for the `sel` expression language.
//!
//! An [`Expression`] is created from source text and evaluated any number of
//! times against caller-supplied [`Environment`]s. Parsing and bytecode
//! lowering happen lazily, once per expression.
//!
//! # Example
//!
//! ```
//! use sel_core::{EnvironmentBuilder, EvalMode, Expression, Value};
//!
//! let env = EnvironmentBuilder::new()
//!     .bind("name", "world")
//!     .bind("excited", true)
//!     .build()
//!     .unwrap();
//!
//! let expr = Expression::new("excited ? 'Hello, ' + name.upper() : 'hi'");
//! let greeting = expr.evaluate(&env, EvalMode::Bytecode).unwrap();
//! assert_eq!(greeting, Value::from("Hello, WORLD"));
//!
//! let same = expr.evaluate(&env, EvalMode::TreeWalk).unwrap();
//! assert_eq!(same, greeting);
//! ```

pub mod environment;
pub mod error;
pub mod expression;
pub mod options;

pub(crate) use environment::Layered;
pub use environment::{Bindings, Environment, EnvironmentBuilder};
pub use error::Error;
pub use expression::Expression;
pub use options::{CompileOptions, EvalMode};
