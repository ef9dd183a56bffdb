use smallvec::SmallVec;
use tracing::trace;

use super::RuntimeError;
use crate::api::Environment;
use crate::ast::{BoolOp, Expr, Subscript};
use crate::values::{Value, ops};

/// Evaluates an expression tree by recursive descent.
///
/// Operands are evaluated strictly left to right. `&&` and `||` return
/// one of their operands, not a coerced boolean, and skip the right one
/// when the left already decides the result. A ternary evaluates only the
/// selected branch.
///
/// # Example
///
/// ```
/// use sel_core::evaluator::Evaluator;
/// use sel_core::parser::parse;
/// use sel_core::Value;
///
/// let expr = parse("'' || 'default'").unwrap();
/// assert_eq!(Evaluator::new(&()).eval(&expr).unwrap(), Value::from("default"));
/// ```
pub struct Evaluator<'e> {
    env: &'e dyn Environment,
}

impl<'e> Evaluator<'e> {
    pub fn new(env: &'e dyn Environment) -> Self {
        Self { env }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(literal.value()),
            Expr::Reference(name) => {
                trace!(name = name.as_str(), "lookup");
                self.env
                    .get(name)
                    .ok_or_else(|| RuntimeError::NameNotFound { name: name.clone() })
            }
            Expr::Unary { op, operand } => ops::unary(*op, &self.eval(operand)?),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                ops::binary(*op, &left, &right)
            }
            Expr::Comparison { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                ops::compare(*op, &left, &right)
            }
            Expr::Boolean { op, left, right } => {
                let left = self.eval(left)?;
                let decided = match op {
                    BoolOp::Or => left.is_truthy(),
                    BoolOp::And => !left.is_truthy(),
                };
                if decided { Ok(left) } else { self.eval(right) }
            }
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            Expr::Accessor { operand, attr } => ops::get_attr(&self.eval(operand)?, attr),
            Expr::Call { callee, args } => {
                let callee = self.eval(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
                callee.call(&args)
            }
            Expr::Index { operand, subscript } => {
                let target = self.eval(operand)?;
                match subscript {
                    Subscript::Item(key) => ops::get_item(&target, &self.eval(key)?),
                    Subscript::Slice { start, stop, step } => {
                        let start = self.eval_optional(start.as_deref())?;
                        let stop = self.eval_optional(stop.as_deref())?;
                        let step = self.eval_optional(step.as_deref())?;
                        ops::get_slice(&target, &start, &stop, &step)
                    }
                }
            }
        }
    }

    /// An omitted slice bound evaluates to `None`.
    fn eval_optional(&self, expr: Option<&Expr>) -> Result<Value, RuntimeError> {
        match expr {
            Some(expr) => self.eval(expr),
            None => Ok(Value::None),
        }
    }
}
