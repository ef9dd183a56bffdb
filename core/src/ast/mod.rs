//! Expression tree produced by the parser.
//!
//! The tree is immutable after parsing. Both the tree-walking
//! [`Evaluator`](crate::evaluator::Evaluator) and the
//! [`BytecodeCompiler`](crate::compiler::BytecodeCompiler) consume it by
//! exhaustive matching on [`Expr`].

mod operators;

pub use operators::{BinaryOp, BoolOp, ComparisonOp, UnaryOp};

use core::fmt;

use crate::values::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Literal {
    pub fn value(&self) -> Value {
        match self {
            Literal::Int(value) => Value::Int(*value),
            Literal::Float(value) => Value::Float(*value),
            Literal::Str(value) => Value::str(value),
        }
    }
}

/// The bracketed part of an index expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Subscript {
    /// `x[key]`
    Item(Box<Expr>),
    /// `x[start:stop:step]`, each bound optional.
    Slice {
        start: Option<Box<Expr>>,
        stop: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Reference(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Boolean {
        op: BoolOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Accessor {
        operand: Box<Expr>,
        attr: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        operand: Box<Expr>,
        subscript: Subscript,
    },
}

/// Renders the tree back to source, parenthesizing every compound
/// sub-expression. Parsing the output yields the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Int(value)) => write!(f, "{value}"),
            Expr::Literal(Literal::Float(value)) if value.fract() == 0.0 => write!(f, "{value:.1}"),
            Expr::Literal(Literal::Float(value)) => write!(f, "{value}"),
            Expr::Literal(Literal::Str(value)) => f.write_str(&crate::syntax::quoted(value)),
            Expr::Reference(name) => f.write_str(name),
            Expr::Unary { op, operand } => write!(f, "({op}{operand})"),
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Comparison { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Boolean { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "({cond} ? {then_branch} : {else_branch})"),
            // `1.x` would lex as the float `1.` followed by `x`.
            Expr::Accessor { operand, attr } => match **operand {
                Expr::Literal(Literal::Int(_)) => write!(f, "({operand}).{attr}"),
                _ => write!(f, "{operand}.{attr}"),
            },
            Expr::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expr::Index { operand, subscript } => {
                write!(f, "{operand}[")?;
                match subscript {
                    Subscript::Item(key) => write!(f, "{key}")?,
                    Subscript::Slice { start, stop, step } => {
                        if let Some(start) = start {
                            write!(f, "{start}")?;
                        }
                        f.write_str(":")?;
                        if let Some(stop) = stop {
                            write!(f, "{stop}")?;
                        }
                        if let Some(step) = step {
                            write!(f, ":{step}")?;
                        }
                    }
                }
                f.write_str("]")
            }
        }
    }
}
