//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::common::bindings::parse_binding;

/// Sel - a small, embeddable expression language
#[derive(Parser, Debug)]
#[command(name = "sel", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate an expression
    Eval(EvalArgs),

    /// Inspect the stages of the pipeline
    Debug(DebugArgs),

    /// Start interactive REPL
    Repl(ReplArgs),
}

/// Arguments for the `eval` command.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Expression to evaluate, or `-` to read it from stdin
    pub expression: String,

    /// Bind NAME to the value of a constant expression (repeatable)
    #[arg(long = "bind", value_name = "NAME=EXPR", value_parser = parse_binding)]
    pub bindings: Vec<(String, String)>,

    /// Runtime to use for evaluation
    #[arg(long, default_value = "both")]
    pub runtime: Runtime,
}

/// Arguments for the `debug` command.
#[derive(Args, Debug)]
pub struct DebugArgs {
    #[command(subcommand)]
    pub command: DebugCommand,
}

#[derive(Subcommand, Debug)]
pub enum DebugCommand {
    /// Print the token stream
    Tokens(DebugInputArgs),
    /// Print the parsed expression tree
    Ast(DebugInputArgs),
    /// Print the disassembled bytecode
    Bytecode(DebugInputArgs),
}

#[derive(Args, Debug)]
pub struct DebugInputArgs {
    /// Expression to inspect, or `-` to read it from stdin
    pub expression: String,
}

/// Arguments for the `repl` command.
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Runtime to use for evaluation
    #[arg(long, default_value = "both")]
    pub runtime: Runtime,
}

/// Runtime to use for evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Runtime {
    /// Tree-walking evaluator
    Evaluator,
    /// Bytecode VM
    Vm,
    /// Run both and compare results
    #[default]
    Both,
}
