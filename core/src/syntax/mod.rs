//! Source positions and syntax errors shared by the lexer and the parser.
//!
//! All offsets are measured in characters (not bytes) from the start of the
//! expression source.

mod error;
mod quote;

pub use error::SyntaxError;
pub(crate) use quote::{push_escaped, quote_char, quoted};

use core::ops::Range;

/// A half-open character range inside the expression source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }

    pub fn start(&self) -> usize {
        self.0.start
    }

    pub fn end(&self) -> usize {
        self.0.end
    }

    pub fn len(&self) -> usize {
        self.0.end - self.0.start
    }

    pub fn is_empty(&self) -> bool {
        self.0.start == self.0.end
    }

    /// Every offset covered by the span. An empty span still reports its start.
    pub fn offsets(&self) -> Vec<usize> {
        if self.is_empty() {
            vec![self.0.start]
        } else {
            self.0.clone().collect()
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self(range)
    }
}
