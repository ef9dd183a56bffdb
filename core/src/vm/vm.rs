use tracing::trace;

use super::{Code, Instruction, Stack};
use crate::api::Environment;
use crate::ast::UnaryOp;
use crate::evaluator::RuntimeError;
use crate::values::{Value, ops};

/// Executes one run of compiled [`Code`] against an environment.
///
/// A VM holds only per-run state, so the same `Code` can be executed by
/// any number of VMs at once.
pub struct VM<'a> {
    code: &'a Code,
    env: &'a dyn Environment,
    stack: Stack,
}

impl<'a> VM<'a> {
    pub fn new(code: &'a Code, env: &'a dyn Environment) -> Self {
        VM {
            code,
            env,
            stack: Stack::new(code.max_stack_size),
        }
    }

    /// Runs `code` to completion and returns the single value it leaves.
    ///
    /// # Example
    ///
    /// ```
    /// use sel_core::compiler::BytecodeCompiler;
    /// use sel_core::parser::parse;
    /// use sel_core::vm::VM;
    /// use sel_core::Value;
    ///
    /// let code = BytecodeCompiler::compile(&parse("0 || 'fallback'").unwrap()).unwrap();
    /// assert_eq!(VM::execute(&code, &()).unwrap(), Value::from("fallback"));
    /// ```
    pub fn execute(code: &'a Code, env: &'a dyn Environment) -> Result<Value, RuntimeError> {
        VM::new(code, env).run()
    }

    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        let result = self.run_main_loop();
        match result {
            Ok(()) => {
                let value = self.stack.pop();
                debug_assert!(self.stack.is_empty(), "Stack should be empty.");
                Ok(value)
            }
            Err(err) => {
                self.stack.clear();
                Err(err)
            }
        }
    }

    fn run_main_loop(&mut self) -> Result<(), RuntimeError> {
        let code = self.code;
        let mut pc = 0;
        while let Some(&instruction) = code.instructions.get(pc) {
            trace!(pc, %instruction, depth = self.stack.len(), "step");
            pc += 1;

            use Instruction::*;
            match instruction {
                LoadConst(id) => {
                    let value = code
                        .symbols
                        .literal(id)
                        .unwrap_or_else(|| panic!("LOAD_CONST {id} out of range (compiler bug)"));
                    self.stack.push(value.clone());
                }
                LoadRef(id) => {
                    let name = code
                        .symbols
                        .reference(id)
                        .unwrap_or_else(|| panic!("LOAD_REF {id} out of range (compiler bug)"));
                    let value = self
                        .env
                        .get(name)
                        .ok_or_else(|| RuntimeError::NameNotFound {
                            name: name.to_string(),
                        })?;
                    self.stack.push(value);
                }
                Not => self.unary(UnaryOp::Not)?,
                Negate => self.unary(UnaryOp::Neg)?,
                Positive => self.unary(UnaryOp::Pos)?,
                BinaryOp(op) => {
                    let right = self.stack.pop();
                    let left = self.stack.pop();
                    self.stack.push(ops::binary(op, &left, &right)?);
                }
                CompareOp(op) => {
                    let right = self.stack.pop();
                    let left = self.stack.pop();
                    self.stack.push(ops::compare(op, &left, &right)?);
                }
                Call(argc) => {
                    let args = self.stack.pop_n(argc as usize);
                    let callee = self.stack.pop();
                    self.stack.push(callee.call(&args)?);
                }
                GetItem(1) => {
                    let key = self.stack.pop();
                    let target = self.stack.pop();
                    self.stack.push(ops::get_item(&target, &key)?);
                }
                GetItem(3) => {
                    let step = self.stack.pop();
                    let stop = self.stack.pop();
                    let start = self.stack.pop();
                    let target = self.stack.pop();
                    self.stack
                        .push(ops::get_slice(&target, &start, &stop, &step)?);
                }
                GetItem(n) => panic!("GET_ITEM expects 1 or 3 operands, got {n} (compiler bug)"),
                GetAttr => {
                    let name = self.stack.pop();
                    let target = self.stack.pop();
                    let Some(attr) = name.as_str() else {
                        panic!("GET_ATTR name must be a string, got {name:?} (compiler bug)");
                    };
                    self.stack.push(ops::get_attr(&target, attr)?);
                }
                JumpForward(offset) => pc += offset as usize,
                PopJumpIfTrue(offset) => {
                    if self.stack.pop().is_truthy() {
                        pc += offset as usize;
                    }
                }
                PopJumpIfFalse(offset) => {
                    if !self.stack.pop().is_truthy() {
                        pc += offset as usize;
                    }
                }
                JumpIfTrue(offset) => {
                    if self.stack.peek().is_truthy() {
                        pc += offset as usize;
                    }
                }
                JumpIfFalse(offset) => {
                    if !self.stack.peek().is_truthy() {
                        pc += offset as usize;
                    }
                }
                Pop => {
                    self.stack.pop();
                }
            }
        }
        Ok(())
    }

    fn unary(&mut self, op: UnaryOp) -> Result<(), RuntimeError> {
        let operand = self.stack.pop();
        self.stack.push(ops::unary(op, &operand)?);
        Ok(())
    }
}
