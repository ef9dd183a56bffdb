//! Stack-based virtual machine executing compiled [`Code`].

mod code;
mod instruction_set;
mod stack;
mod vm;

pub use code::Code;
pub use instruction_set::Instruction;
pub use vm::VM;

pub(crate) use stack::Stack;
