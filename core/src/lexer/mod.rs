//! Turns expression source into a flat token sequence.

mod lexer;
mod token;

pub use lexer::{Lexer, tokenize};
pub use token::{Operator, Token, TokenKind};

#[cfg(test)]
mod lexer_test;
