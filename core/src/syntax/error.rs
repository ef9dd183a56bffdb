use thiserror::Error;

use super::{push_escaped, quote_char};

/// A lexing or parsing failure.
///
/// Carries the message, the full expression source and the character offsets
/// the error points at. Offsets are kept sorted and without duplicates; an
/// offset equal to the source length points just past the last character.
///
/// The [`Display`](core::fmt::Display) rendering shows the message, the quoted
/// source and a caret line:
///
/// ```
/// use sel_core::parser::parse;
///
/// let err = parse("(1 + 2").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Expected ')' was not found\n    '(1 + 2'\n          ^"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}\n    {}", self.caret_lines())]
pub struct SyntaxError {
    message: String,
    input: String,
    offsets: Vec<usize>,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        source: impl Into<String>,
        offsets: impl IntoIterator<Item = usize>,
    ) -> Self {
        let mut offsets: Vec<usize> = offsets.into_iter().collect();
        offsets.sort_unstable();
        offsets.dedup();
        Self {
            message: message.into(),
            input: source.into(),
            offsets,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &str {
        &self.input
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Groups the offsets into contiguous half-open ranges.
    ///
    /// `[2, 3, 4, 9]` becomes `[2..5, 9..10]`.
    pub fn ranges(&self) -> Vec<core::ops::Range<usize>> {
        let mut ranges: Vec<core::ops::Range<usize>> = Vec::new();
        for &offset in &self.offsets {
            match ranges.last_mut() {
                Some(last) if last.end == offset => last.end = offset + 1,
                _ => ranges.push(offset..offset + 1),
            }
        }
        ranges
    }

    /// The quoted source, then a caret line indented to match.
    fn caret_lines(&self) -> String {
        let quote = quote_char(&self.input);
        let mut line = String::new();
        let mut columns = Vec::with_capacity(self.input.len() + 1);
        line.push(quote);
        for c in self.input.chars() {
            columns.push(line.chars().count());
            push_escaped(&mut line, c, quote);
        }
        columns.push(line.chars().count());
        line.push(quote);

        let len = columns.len() - 1;
        let end = columns[len];
        let mut carets = String::new();
        let mut width = 0;
        for &offset in &self.offsets {
            let column = columns
                .get(offset)
                .copied()
                .unwrap_or(end + offset.saturating_sub(len));
            if column < width {
                continue;
            }
            carets.extend(core::iter::repeat_n(' ', column - width));
            carets.push('^');
            width = column + 1;
        }
        format!("{line}\n    {carets}")
    }
}
