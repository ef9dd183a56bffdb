use core::fmt;

use super::Instruction;
use crate::compiler::SymbolTable;

/// Compiled bytecode for one expression.
#[derive(Debug, Clone)]
pub struct Code {
    pub instructions: Vec<Instruction>,
    pub symbols: SymbolTable,
    /// Deepest evaluation stack any execution path reaches.
    pub max_stack_size: usize,
}

/// Disassembly listing, one instruction per line. Symbol operands are
/// annotated with the literal or name they refer to.
///
/// ```text
/// 0  LOAD_REF 0 (add)
/// 1  LOAD_CONST 0 (1)
/// 2  LOAD_CONST 1 (2)
/// 3  CALL 2
/// ```
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{index}  {instruction}")?;
            match instruction {
                Instruction::LoadConst(id) => {
                    if let Some(value) = self.symbols.literal(*id) {
                        write!(f, " ({})", value.repr())?;
                    }
                }
                Instruction::LoadRef(id) => {
                    if let Some(name) = self.symbols.reference(*id) {
                        write!(f, " ({name})")?;
                    }
                }
                Instruction::JumpForward(offset)
                | Instruction::PopJumpIfTrue(offset)
                | Instruction::PopJumpIfFalse(offset)
                | Instruction::JumpIfTrue(offset)
                | Instruction::JumpIfFalse(offset) => {
                    write!(f, " (to {})", index + 1 + *offset as usize)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
