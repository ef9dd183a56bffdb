use core::fmt;

use crate::ast::{BinaryOp, ComparisonOp};

/// One VM operation with its operand.
///
/// Jump operands are relative: the number of instructions to skip after the
/// one following the jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Push the literal with the given symbol id.
    LoadConst(u32),
    /// Push the environment value of the name with the given symbol id.
    LoadRef(u32),

    Not,
    Negate,
    Positive,
    BinaryOp(BinaryOp),
    CompareOp(ComparisonOp),

    /// Pop `n` arguments and the callee beneath them, push the result.
    Call(u32),
    /// Pop 1 key, or 3 slice bounds, and the operand beneath, push the result.
    GetItem(u32),
    /// Pop the attribute name and the operand beneath, push the attribute.
    GetAttr,

    JumpForward(u32),
    PopJumpIfTrue(u32),
    PopJumpIfFalse(u32),
    /// Jump without popping, leaving the tested value as the result.
    JumpIfTrue(u32),
    JumpIfFalse(u32),
    Pop,
}

impl Instruction {
    pub fn opname(&self) -> &'static str {
        match self {
            Instruction::LoadConst(_) => "LOAD_CONST",
            Instruction::LoadRef(_) => "LOAD_REF",
            Instruction::Not => "NOT",
            Instruction::Negate => "NEGATE",
            Instruction::Positive => "POSITIVE",
            Instruction::BinaryOp(_) => "BINARY_OP",
            Instruction::CompareOp(_) => "COMPARE_OP",
            Instruction::Call(_) => "CALL",
            Instruction::GetItem(_) => "GET_ITEM",
            Instruction::GetAttr => "GET_ATTR",
            Instruction::JumpForward(_) => "JUMP_FORWARD",
            Instruction::PopJumpIfTrue(_) => "POP_JUMP_IF_TRUE",
            Instruction::PopJumpIfFalse(_) => "POP_JUMP_IF_FALSE",
            Instruction::JumpIfTrue(_) => "JUMP_IF_TRUE",
            Instruction::JumpIfFalse(_) => "JUMP_IF_FALSE",
            Instruction::Pop => "POP",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.opname();
        match self {
            Instruction::LoadConst(arg)
            | Instruction::LoadRef(arg)
            | Instruction::Call(arg)
            | Instruction::GetItem(arg)
            | Instruction::JumpForward(arg)
            | Instruction::PopJumpIfTrue(arg)
            | Instruction::PopJumpIfFalse(arg)
            | Instruction::JumpIfTrue(arg)
            | Instruction::JumpIfFalse(arg) => write!(f, "{name} {arg}"),
            Instruction::BinaryOp(op) => write!(f, "{name} {op}"),
            Instruction::CompareOp(op) => write!(f, "{name} {op}"),
            Instruction::Not
            | Instruction::Negate
            | Instruction::Positive
            | Instruction::GetAttr
            | Instruction::Pop => f.write_str(name),
        }
    }
}
