use lazy_static::lazy_static;
use tracing::debug;

use super::token::{Operator, Token, TokenKind};
use crate::syntax::SyntaxError;

lazy_static! {
    /// Operator vocabulary sorted by descending length, so `==` wins over `=`
    /// and `**` over `*`.
    static ref OPERATORS_BY_LENGTH: Vec<Operator> = {
        let mut ops = Operator::ALL.to_vec();
        ops.sort_by_key(|op| core::cmp::Reverse(op.as_str().len()));
        ops
    };
}

/// Single-pass scanner over the characters of an expression.
pub struct Lexer<'s> {
    source: &'s str,
    chars: Vec<char>,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Scans the whole source.
    ///
    /// An unterminated string aborts immediately. Unrecognized characters are
    /// collected and reported together once the scan is complete.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.skip_whitespace() {
            let start = self.pos;
            let kind = if c.is_alphabetic() || c == '_' {
                self.identifier()
            } else if c == '\'' || c == '"' {
                self.string(c)?
            } else if c.is_ascii_digit() {
                self.number()?
            } else {
                self.operator(c)
            };
            tokens.push(Token::new(kind, start..self.pos));
        }

        let invalid: Vec<usize> = tokens
            .iter()
            .filter(|token| matches!(token.kind, TokenKind::Error(_)))
            .map(Token::offset)
            .collect();
        if !invalid.is_empty() {
            debug!(count = invalid.len(), "Rejecting unrecognized characters");
            return Err(SyntaxError::new(
                "Unexpected tokens encountered during lexing",
                self.source,
                invalid,
            ));
        }

        debug!(count = tokens.len(), "Tokenized expression");
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> Option<char> {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                return Some(c);
            }
            self.pos += 1;
        }
        None
    }

    fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&mut pred) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn identifier(&mut self) -> TokenKind {
        TokenKind::Identifier(self.take_while(|c| c.is_alphanumeric() || c == '_'))
    }

    /// A quoted string. Only `\` followed by the delimiting quote is an
    /// escape; every other backslash is kept as written.
    fn string(&mut self, quote: char) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        let mut value = String::new();
        let mut i = start + 1;
        loop {
            match self.chars.get(i) {
                None => {
                    return Err(SyntaxError::new(
                        "Unexpected EOF while parsing",
                        self.source,
                        [start],
                    ));
                }
                Some(&c) if c == quote => break,
                Some(&'\\') if self.chars.get(i + 1) == Some(&quote) => {
                    value.push(quote);
                    i += 2;
                }
                Some(&c) => {
                    value.push(c);
                    i += 1;
                }
            }
        }
        self.pos = i + 1;
        Ok(TokenKind::Str(value))
    }

    fn number(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        let mut seen_dot = false;
        let text = self.take_while(|c| match c {
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            c => c.is_ascii_digit(),
        });

        if seen_dot {
            // The run always starts with a digit, so `2.` and `2.5` both parse.
            text.parse::<f64>().map(TokenKind::Float).map_err(|_| {
                SyntaxError::new("Invalid float literal", self.source, start..self.pos)
            })
        } else {
            text.parse::<i64>().map(TokenKind::Int).map_err(|_| {
                SyntaxError::new("Integer literal is too large", self.source, start..self.pos)
            })
        }
    }

    fn operator(&mut self, c: char) -> TokenKind {
        for &op in OPERATORS_BY_LENGTH.iter() {
            let text = op.as_str();
            let len = text.chars().count();
            let matches = self
                .chars
                .get(self.pos..self.pos + len)
                .is_some_and(|window| window.iter().copied().eq(text.chars()));
            if matches {
                self.pos += len;
                return TokenKind::Operator(op);
            }
        }
        self.pos += 1;
        TokenKind::Error(c)
    }
}

/// Tokenizes `source`.
///
/// # Example
///
/// ```
/// use sel_core::lexer::{Operator, TokenKind, tokenize};
///
/// let tokens = tokenize("a ** 2").unwrap();
/// assert_eq!(tokens[1].kind, TokenKind::Operator(Operator::Pow));
/// assert_eq!(tokens[2].offset(), 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source).tokenize()
}
