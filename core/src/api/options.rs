//! Options controlling how expressions are compiled and run.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Compile-time settings, fixed when an [`Expression`](super::Expression)
/// is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Deepest sub-expression nesting the parser accepts.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Which engine runs an evaluation. Both produce the same results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvalMode {
    /// Walk the expression tree directly.
    TreeWalk,
    /// Lower to bytecode once and run it on the stack VM.
    #[default]
    Bytecode,
}
