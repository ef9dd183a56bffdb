//! Public error type for the `sel` API.

use thiserror::Error;

use crate::compiler::CompileError;
use crate::evaluator::RuntimeError;
use crate::syntax::SyntaxError;

/// Any failure surfaced by [`Expression`](super::Expression) or the
/// environment builder.
///
/// Syntax errors are always fatal to the parse. Runtime errors are passed
/// through exactly as the failing operation raised them, so a host
/// function's own [`RuntimeError`] reaches the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("duplicate binding(s): {}", .0.join(", "))]
    DuplicateBinding(Vec<String>),
}

impl Error {
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    pub fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            Error::Runtime(err) => Some(err),
            _ => None,
        }
    }
}
