//! Parsed and compiled expressions.

use once_cell::sync::OnceCell;
use tracing::debug;

use super::{CompileOptions, Environment, Error, EvalMode, Layered};
use crate::ast::Expr;
use crate::compiler::BytecodeCompiler;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::stdlib;
use crate::values::Value;
use crate::vm::{Code, VM};

/// A source expression with its lazily built tree and bytecode.
///
/// Construction does no work. The first call that needs the tree parses
/// the source, and the first bytecode evaluation lowers it; both results
/// are cached for the life of the expression. The caches are initialized
/// at most once even when several threads race on the first call, so an
/// `Expression` can be shared freely (`Send + Sync`).
///
/// A syntax error is not cached: every call reports it again.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use sel_core::{EvalMode, Expression, Value};
///
/// let expr = Expression::new("int(x) * 2");
/// let env = HashMap::from([("x".to_string(), Value::from("21"))]);
/// assert_eq!(expr.evaluate(&env, EvalMode::default()).unwrap(), Value::Int(42));
/// ```
#[derive(Debug)]
pub struct Expression {
    source: String,
    options: CompileOptions,
    ast: OnceCell<Expr>,
    code: OnceCell<Code>,
}

impl Expression {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_options(source, CompileOptions::default())
    }

    pub fn with_options(source: impl Into<String>, options: CompileOptions) -> Self {
        Self {
            source: source.into(),
            options,
            ast: OnceCell::new(),
            code: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// The parsed expression tree.
    pub fn ast(&self) -> Result<&Expr, Error> {
        self.ast.get_or_try_init(|| -> Result<Expr, Error> {
            debug!(source = self.source.as_str(), "Parsing expression");
            Ok(parser::parse_with_max_depth(
                &self.source,
                self.options.max_depth,
            )?)
        })
    }

    /// The compiled bytecode.
    pub fn code(&self) -> Result<&Code, Error> {
        self.code.get_or_try_init(|| -> Result<Code, Error> {
            Ok(BytecodeCompiler::compile(self.ast()?)?)
        })
    }

    /// Evaluates the expression against `env`.
    ///
    /// Names missing from `env` fall back to the prelude (`bool`, `float`,
    /// `int`, `str`, `None`). Runtime errors reach the caller exactly as the
    /// failing operation raised them.
    pub fn evaluate(&self, env: &dyn Environment, mode: EvalMode) -> Result<Value, Error> {
        let env = Layered::new(env, stdlib::prelude());
        let value = match mode {
            EvalMode::TreeWalk => Evaluator::new(&env).eval(self.ast()?)?,
            EvalMode::Bytecode => VM::execute(self.code()?, &env)?,
        };
        Ok(value)
    }
}
