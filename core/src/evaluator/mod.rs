//! Direct tree-walking evaluation.

mod error;
mod evaluator;

pub use error::{ErrorKind, RuntimeError};
pub use evaluator::Evaluator;

#[cfg(test)]
mod evaluator_test;
