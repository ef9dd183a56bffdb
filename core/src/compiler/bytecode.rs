//! Bytecode compiler implementation.

use tracing::debug;

use super::{CompileError, SymbolTable};
use crate::ast::{BoolOp, Expr, Subscript, UnaryOp};
use crate::values::Value;
use crate::vm::{Code, Instruction};

/// Lowers an expression tree to [`Code`].
///
/// Every node emits a self-contained fragment with a net effect of one
/// pushed value. The compiler tracks the operand stack depth as it emits so
/// the VM can size its stack exactly.
pub struct BytecodeCompiler {
    symbols: SymbolTable,

    instructions: Vec<Instruction>,

    /// Current stack depth during compilation
    current_stack_depth: usize,

    /// Maximum stack depth observed
    max_stack_size: usize,
}

impl BytecodeCompiler {
    fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            instructions: Vec::new(),
            current_stack_depth: 0,
            max_stack_size: 0,
        }
    }

    pub fn compile(expr: &Expr) -> Result<Code, CompileError> {
        let mut compiler = Self::new();
        compiler.compile_expr(expr)?;
        debug_assert_eq!(compiler.current_stack_depth, 1);
        Ok(compiler.finalize())
    }

    fn finalize(self) -> Code {
        debug!(
            instructions = self.instructions.len(),
            literals = self.symbols.literals().len(),
            references = self.symbols.references().len(),
            max_stack_size = self.max_stack_size,
            "Compiled expression"
        );
        Code {
            instructions: self.instructions,
            symbols: self.symbols,
            max_stack_size: self.max_stack_size,
        }
    }

    // === Stack Management ===

    /// Push a value onto the stack (increases depth by 1).
    fn push_stack(&mut self) {
        self.current_stack_depth += 1;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
    }

    /// Pop a value from the stack (decreases depth by 1).
    fn pop_stack(&mut self) {
        debug_assert!(self.current_stack_depth > 0, "Stack underflow");
        self.current_stack_depth -= 1;
    }

    /// Pop N values from the stack.
    fn pop_stack_n(&mut self, n: usize) {
        debug_assert!(
            self.current_stack_depth >= n,
            "Stack underflow: trying to pop {} but depth is {}",
            n,
            self.current_stack_depth
        );
        self.current_stack_depth -= n;
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    // === Jump Patching ===

    /// Reserve a jump instruction and return its index.
    ///
    /// The offset is filled in later by `patch_jump`.
    fn jump_placeholder(&mut self, make_jump: fn(u32) -> Instruction) -> usize {
        let placeholder_index = self.instructions.len();
        self.emit(make_jump(0));
        placeholder_index
    }

    /// Get the current instruction index (for use as a jump label).
    fn label(&self) -> usize {
        self.instructions.len()
    }

    fn patch_jump(
        &mut self,
        placeholder_index: usize,
        target_label: usize,
        make_jump: fn(u32) -> Instruction,
    ) -> Result<(), CompileError> {
        // The VM advances past the jump before applying it, so:
        // offset = target - current - 1
        debug_assert!(target_label > placeholder_index);
        debug_assert_eq!(self.instructions[placeholder_index], make_jump(0));
        let offset = u32::try_from(target_label - placeholder_index - 1)
            .map_err(|_| CompileError::JumpTooFar)?;
        self.instructions[placeholder_index] = make_jump(offset);
        Ok(())
    }

    // === Expressions ===

    fn load_const(&mut self, value: Value) -> Result<(), CompileError> {
        let id = self.symbols.add_literal(value)?;
        self.emit(Instruction::LoadConst(id));
        self.push_stack();
        Ok(())
    }

    fn compile_optional(&mut self, expr: Option<&Expr>) -> Result<(), CompileError> {
        match expr {
            Some(expr) => self.compile_expr(expr),
            None => self.load_const(Value::None),
        }
    }

    fn compile_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        match expr {
            Expr::Literal(literal) => self.load_const(literal.value())?,
            Expr::Reference(name) => {
                let id = self.symbols.add_reference(name)?;
                self.emit(Instruction::LoadRef(id));
                self.push_stack();
            }
            Expr::Unary { op, operand } => {
                self.compile_expr(operand)?;
                self.emit(match op {
                    UnaryOp::Not => Instruction::Not,
                    UnaryOp::Neg => Instruction::Negate,
                    UnaryOp::Pos => Instruction::Positive,
                });
            }
            Expr::Binary { op, left, right } => {
                self.compile_expr(left)?;
                self.compile_expr(right)?;
                self.emit(Instruction::BinaryOp(*op));
                self.pop_stack();
            }
            Expr::Comparison { op, left, right } => {
                self.compile_expr(left)?;
                self.compile_expr(right)?;
                self.emit(Instruction::CompareOp(*op));
                self.pop_stack();
            }
            Expr::Boolean { op, left, right } => {
                // [left] JUMP_IF_x end; POP; [right]; end:
                let make_jump: fn(u32) -> Instruction = match op {
                    BoolOp::Or => Instruction::JumpIfTrue,
                    BoolOp::And => Instruction::JumpIfFalse,
                };
                self.compile_expr(left)?;
                let jump = self.jump_placeholder(make_jump);
                self.emit(Instruction::Pop);
                self.pop_stack();
                self.compile_expr(right)?;
                let end = self.label();
                self.patch_jump(jump, end, make_jump)?;
            }
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                // [cond] POP_JUMP_IF_FALSE else; [then] JUMP_FORWARD end; else: [else]; end:
                self.compile_expr(cond)?;
                let else_jump = self.jump_placeholder(Instruction::PopJumpIfFalse);
                self.pop_stack();
                self.compile_expr(then_branch)?;
                let end_jump = self.jump_placeholder(Instruction::JumpForward);
                let else_label = self.label();
                self.patch_jump(else_jump, else_label, Instruction::PopJumpIfFalse)?;
                // Only one branch leaves its value on the stack.
                self.pop_stack();
                self.compile_expr(else_branch)?;
                let end = self.label();
                self.patch_jump(end_jump, end, Instruction::JumpForward)?;
            }
            Expr::Accessor { operand, attr } => {
                self.compile_expr(operand)?;
                self.load_const(Value::str(attr))?;
                self.emit(Instruction::GetAttr);
                self.pop_stack();
            }
            Expr::Call { callee, args } => {
                // Callee first, then arguments left to right.
                self.compile_expr(callee)?;
                for arg in args {
                    self.compile_expr(arg)?;
                }
                let argc = u32::try_from(args.len()).map_err(|_| CompileError::TooManyArguments)?;
                self.emit(Instruction::Call(argc));
                self.pop_stack_n(args.len());
            }
            Expr::Index { operand, subscript } => {
                self.compile_expr(operand)?;
                match subscript {
                    Subscript::Item(key) => {
                        self.compile_expr(key)?;
                        self.emit(Instruction::GetItem(1));
                        self.pop_stack();
                    }
                    Subscript::Slice { start, stop, step } => {
                        self.compile_optional(start.as_deref())?;
                        self.compile_optional(stop.as_deref())?;
                        self.compile_optional(step.as_deref())?;
                        self.emit(Instruction::GetItem(3));
                        self.pop_stack_n(3);
                    }
                }
            }
        }
        Ok(())
    }
}
