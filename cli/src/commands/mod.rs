//! Command implementations.
//!
//! Each subcommand has its own module with a `run` function.

pub mod debug;
pub mod eval;
pub mod repl;
