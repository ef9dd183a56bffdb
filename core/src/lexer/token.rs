use core::fmt;

use crate::syntax::Span;

/// Operators and punctuation recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    GreaterEq,
    LessEq,
    Greater,
    Less,
    And,
    Or,
    Not,
    FloorDiv,
    Pow,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Question,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

impl Operator {
    /// The full vocabulary, in declaration order.
    pub const ALL: [Operator; 24] = [
        Operator::Eq,
        Operator::NotEq,
        Operator::GreaterEq,
        Operator::LessEq,
        Operator::Greater,
        Operator::Less,
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::FloorDiv,
        Operator::Pow,
        Operator::Plus,
        Operator::Minus,
        Operator::Star,
        Operator::Slash,
        Operator::Percent,
        Operator::Question,
        Operator::Colon,
        Operator::Dot,
        Operator::Comma,
        Operator::LParen,
        Operator::RParen,
        Operator::LBracket,
        Operator::RBracket,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::GreaterEq => ">=",
            Operator::LessEq => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::FloorDiv => "//",
            Operator::Pow => "**",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Question => "?",
            Operator::Colon => ":",
            Operator::Dot => ".",
            Operator::Comma => ",",
            Operator::LParen => "(",
            Operator::RParen => ")",
            Operator::LBracket => "[",
            Operator::RBracket => "]",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a token, carrying its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Int(i64),
    Float(f64),
    Str(String),
    Operator(Operator),
    /// A character that starts no valid token.
    Error(char),
}

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Str(_))
    }

    /// Short label used by debug listings.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "IDENT",
            TokenKind::Int(_) => "INT",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Str(_) => "STR",
            TokenKind::Operator(_) => "OP",
            TokenKind::Error(_) => "ERROR",
        }
    }
}

/// A lexed token and the characters of the source it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: impl Into<Span>) -> Self {
        Self {
            kind,
            span: span.into(),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.start()
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Int(value) => write!(f, "{value}"),
            TokenKind::Float(value) => write!(f, "{value:?}"),
            TokenKind::Str(value) => f.write_str(&crate::syntax::quoted(value)),
            TokenKind::Operator(op) => write!(f, "{op}"),
            TokenKind::Error(c) => write!(f, "{c}"),
        }
    }
}
