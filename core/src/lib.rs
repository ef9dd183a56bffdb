//! Core of the `sel` expression language.
//!
//! The pipeline is split into small stages that can be used independently:
//!
//! - [`lexer`] turns source text into a flat token sequence.
//! - [`parser`] builds an [`ast::Expr`] tree with precise syntax errors.
//! - [`evaluator`] walks the tree directly.
//! - [`compiler`] lowers the tree into [`vm::Code`] which the [`vm::VM`] executes.
//!
//! Most embedders only need [`api::Expression`].

pub mod api;
pub mod ast;
pub mod compiler;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod stdlib;
pub mod syntax;
pub mod values;
pub mod vm;

pub use api::{
    Bindings, CompileOptions, EnvironmentBuilder, Environment, Error, EvalMode, Expression,
};
pub use evaluator::{ErrorKind, RuntimeError};
pub use syntax::SyntaxError;
pub use values::Value;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_short_circuit() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
