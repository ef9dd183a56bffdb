use thiserror::Error;

/// Failure while lowering an expression tree to bytecode.
///
/// Only reachable with pathologically large expressions; operands are
/// 32-bit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("too many distinct literals in one expression")]
    TooManyLiterals,

    #[error("too many distinct names in one expression")]
    TooManyReferences,

    #[error("too many call arguments")]
    TooManyArguments,

    #[error("jump offset too large")]
    JumpTooFar,
}
