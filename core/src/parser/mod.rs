//! Recursive-descent parser with expectation-based error reporting.

mod parser;

pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse, parse_with_max_depth};

#[cfg(test)]
mod parser_test;
