//! Lowering of expression trees to stack-machine bytecode.

mod bytecode;
mod error;
mod symbols;

pub use bytecode::BytecodeCompiler;
pub use error::CompileError;
pub use symbols::SymbolTable;

#[cfg(test)]
mod bytecode_test;
