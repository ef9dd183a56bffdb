//! Common utilities shared across CLI commands.

pub mod bindings;
pub mod error;
pub mod input;

pub use error::CliResult;
