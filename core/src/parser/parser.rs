use tracing::{debug, trace};

use crate::ast::{BinaryOp, BoolOp, ComparisonOp, Expr, Literal, Subscript, UnaryOp};
use crate::lexer::{Operator, Token, TokenKind, tokenize};
use crate::syntax::{Span, SyntaxError};

/// Default limit for nested sub-expressions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

const EXPECT_EXPR: &str = "expr";
const EXPECT_SUBSCRIPT: &str = "expr | :";
const EXPECT_IDENTIFIER: &str = "identifier";

/// Recursive-descent parser over a token slice.
///
/// Whenever the parser commits to requiring something specific it pushes a
/// description onto the expectation stack; a failure while an expectation is
/// pending reports the most recent one.
pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    /// Index of the next token to consume.
    pos: usize,
    expectations: Vec<&'static str>,
    depth: usize,
    max_depth: usize,
}

type ParseResult = Result<Expr, SyntaxError>;

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            expectations: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Parses one complete expression; trailing tokens are an error.
    pub fn parse(mut self) -> ParseResult {
        let expr = self.ternary()?;
        if self.pos < self.tokens.len() {
            return Err(self.error());
        }
        Ok(expr)
    }

    // Token cursor.

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, op: Operator) -> bool {
        self.peek().is_some_and(|token| token.is_operator(op))
    }

    fn peek_operator(&self) -> Option<Operator> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) => Some(*op),
            _ => None,
        }
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, op: Operator) -> bool {
        if self.peek_is(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // Errors.

    fn expect(&mut self, description: &'static str) {
        self.expectations.push(description);
    }

    fn fulfill(&mut self) {
        self.expectations.pop();
    }

    /// Builds the error for a failure at the current position.
    ///
    /// With an expectation pending, the error names it and points at the last
    /// consumed token. Otherwise it points at the offending next token.
    fn error(&mut self) -> SyntaxError {
        let len = self.source.chars().count();
        match self.expectations.pop() {
            Some(description) => {
                let offsets = match self.pos.checked_sub(1) {
                    Some(last) => self.tokens[last].span.offsets(),
                    None => vec![0],
                };
                SyntaxError::new(
                    format!("Expected '{description}' was not found"),
                    self.source,
                    offsets,
                )
            }
            None => {
                let offsets = match self.peek() {
                    Some(token) => token.span.offsets(),
                    None if self.pos == 0 => vec![0],
                    None => vec![len.saturating_sub(1)],
                };
                SyntaxError::new(
                    "Unexpected token encountered while parsing",
                    self.source,
                    offsets,
                )
            }
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let span = match self.peek() {
                Some(token) => token.span.clone(),
                None => {
                    let end = self.source.chars().count();
                    Span::new(end, end)
                }
            };
            return Err(SyntaxError::new(
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    self.max_depth
                ),
                self.source,
                span.offsets(),
            ));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Unwinds the levels charged by a left-associative or postfix chain.
    fn exit_chain(&mut self, links: usize) {
        self.depth -= links;
    }

    // Grammar, loosest binding first.

    fn ternary(&mut self) -> ParseResult {
        self.enter()?;
        let cond = self.logical_or()?;
        let expr = if self.eat(Operator::Question) {
            self.expect(EXPECT_EXPR);
            let then_branch = self.ternary()?;
            self.expect(":");
            if !self.eat(Operator::Colon) {
                return Err(self.error());
            }
            self.fulfill();
            let else_branch = self.ternary()?;
            self.fulfill();
            Expr::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }
        } else {
            cond
        };
        self.exit();
        Ok(expr)
    }

    fn logical_or(&mut self) -> ParseResult {
        let mut left = self.logical_and()?;
        let mut links = 0;
        while self.eat(Operator::Or) {
            self.enter()?;
            links += 1;
            self.expect(EXPECT_EXPR);
            let right = self.logical_and()?;
            self.fulfill();
            left = Expr::Boolean {
                op: BoolOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.exit_chain(links);
        Ok(left)
    }

    fn logical_and(&mut self) -> ParseResult {
        let mut left = self.logical_not()?;
        let mut links = 0;
        while self.eat(Operator::And) {
            self.enter()?;
            links += 1;
            self.expect(EXPECT_EXPR);
            let right = self.logical_not()?;
            self.fulfill();
            left = Expr::Boolean {
                op: BoolOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.exit_chain(links);
        Ok(left)
    }

    fn logical_not(&mut self) -> ParseResult {
        if !self.eat(Operator::Not) {
            return self.comparison();
        }
        self.expect(EXPECT_EXPR);
        let operand = self.comparison()?;
        self.fulfill();
        Ok(Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        })
    }

    fn comparison(&mut self) -> ParseResult {
        let mut left = self.additive()?;
        let mut links = 0;
        while let Some(op) = self.peek_operator().and_then(comparison_op) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            self.expect(EXPECT_EXPR);
            let right = self.additive()?;
            self.fulfill();
            left = Expr::Comparison {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        self.exit_chain(links);
        Ok(left)
    }

    fn additive(&mut self) -> ParseResult {
        let mut left = self.multiplicative()?;
        let mut links = 0;
        while let Some(op) = self.peek_operator().and_then(additive_op) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            self.expect(EXPECT_EXPR);
            let right = self.multiplicative()?;
            self.fulfill();
            left = binary(op, left, right);
        }
        self.exit_chain(links);
        Ok(left)
    }

    fn multiplicative(&mut self) -> ParseResult {
        let mut left = self.unary()?;
        let mut links = 0;
        while let Some(op) = self.peek_operator().and_then(multiplicative_op) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            self.expect(EXPECT_EXPR);
            let right = self.unary()?;
            self.fulfill();
            left = binary(op, left, right);
        }
        self.exit_chain(links);
        Ok(left)
    }

    fn unary(&mut self) -> ParseResult {
        let op = match self.peek_operator() {
            Some(Operator::Minus) => UnaryOp::Neg,
            Some(Operator::Plus) => UnaryOp::Pos,
            _ => return self.power(),
        };
        self.pos += 1;
        self.expect(EXPECT_EXPR);
        let operand = self.power()?;
        self.fulfill();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// `**` is right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    fn power(&mut self) -> ParseResult {
        let base = self.postfix()?;
        if !self.eat(Operator::Pow) {
            return Ok(base);
        }
        self.enter()?;
        self.expect(EXPECT_EXPR);
        let exponent = self.power()?;
        self.fulfill();
        self.exit();
        Ok(binary(BinaryOp::Pow, base, exponent))
    }

    fn postfix(&mut self) -> ParseResult {
        let mut expr = self.primary()?;
        let mut links = 0;
        loop {
            let op = self.peek_operator();
            if !matches!(
                op,
                Some(Operator::Dot | Operator::LBracket | Operator::LParen)
            ) {
                break;
            }
            self.enter()?;
            links += 1;
            expr = match op {
                Some(Operator::Dot) => self.accessor(expr)?,
                Some(Operator::LBracket) => self.index(expr)?,
                _ => self.call(expr)?,
            };
        }
        self.exit_chain(links);
        Ok(expr)
    }

    fn accessor(&mut self, operand: Expr) -> ParseResult {
        self.expect(EXPECT_IDENTIFIER);
        self.pos += 1;
        let attr = match self.peek() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => name.clone(),
            _ => return Err(self.error()),
        };
        self.pos += 1;
        self.fulfill();
        Ok(Expr::Accessor {
            operand: Box::new(operand),
            attr,
        })
    }

    /// `[key]` or a slice with up to three `:`-separated optional slots.
    fn index(&mut self, operand: Expr) -> ParseResult {
        self.expect("]");
        self.pos += 1;
        if self.peek().is_none() || self.peek_is(Operator::RBracket) {
            self.expect(EXPECT_SUBSCRIPT);
            return Err(self.error());
        }

        let mut slots: Vec<Option<Expr>> = Vec::with_capacity(3);
        slots.push(if self.peek_is(Operator::Colon) {
            None
        } else {
            Some(self.ternary()?)
        });
        while self.peek_is(Operator::Colon) {
            if slots.len() >= 3 {
                return Err(self.error());
            }
            self.expect(EXPECT_SUBSCRIPT);
            self.pos += 1;
            let slot = if self.peek_is(Operator::Colon) || self.peek_is(Operator::RBracket) {
                None
            } else {
                Some(self.ternary()?)
            };
            self.fulfill();
            slots.push(slot);
        }
        if !self.eat(Operator::RBracket) {
            return Err(self.error());
        }
        self.fulfill();

        let subscript = if slots.len() == 1 {
            match slots.pop().flatten() {
                Some(key) => Subscript::Item(Box::new(key)),
                None => return Err(self.error()),
            }
        } else {
            let mut slots = slots.into_iter().map(|slot| slot.map(Box::new));
            Subscript::Slice {
                start: slots.next().flatten(),
                stop: slots.next().flatten(),
                step: slots.next().flatten(),
            }
        };
        Ok(Expr::Index {
            operand: Box::new(operand),
            subscript,
        })
    }

    fn call(&mut self, callee: Expr) -> ParseResult {
        self.pos += 1;
        self.expect(")");
        let mut args = Vec::new();
        if self.peek().is_none() {
            return Err(self.error());
        }
        if !self.peek_is(Operator::RParen) {
            args.push(self.ternary()?);
            while self.eat(Operator::Comma) {
                self.expect(EXPECT_EXPR);
                args.push(self.ternary()?);
                self.fulfill();
            }
        }
        if !self.eat(Operator::RParen) {
            return Err(self.error());
        }
        self.fulfill();
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
        })
    }

    fn primary(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Err(self.error());
        };
        let expr = match &token.kind {
            TokenKind::Operator(Operator::LParen) => {
                self.pos += 1;
                self.expect(")");
                let inner = self.ternary()?;
                if !self.eat(Operator::RParen) {
                    return Err(self.error());
                }
                self.fulfill();
                return Ok(inner);
            }
            TokenKind::Identifier(name) => Expr::Reference(name.clone()),
            TokenKind::Int(value) => Expr::Literal(Literal::Int(*value)),
            TokenKind::Float(value) => Expr::Literal(Literal::Float(*value)),
            TokenKind::Str(value) => Expr::Literal(Literal::Str(value.clone())),
            TokenKind::Operator(_) | TokenKind::Error(_) => return Err(self.error()),
        };
        trace!(token = %token, "primary");
        self.bump();
        Ok(expr)
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn comparison_op(op: Operator) -> Option<ComparisonOp> {
    Some(match op {
        Operator::Eq => ComparisonOp::Eq,
        Operator::NotEq => ComparisonOp::NotEq,
        Operator::Greater => ComparisonOp::Greater,
        Operator::Less => ComparisonOp::Less,
        Operator::GreaterEq => ComparisonOp::GreaterEq,
        Operator::LessEq => ComparisonOp::LessEq,
        _ => return None,
    })
}

fn additive_op(op: Operator) -> Option<BinaryOp> {
    match op {
        Operator::Plus => Some(BinaryOp::Add),
        Operator::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(op: Operator) -> Option<BinaryOp> {
    match op {
        Operator::Star => Some(BinaryOp::Mul),
        Operator::Slash => Some(BinaryOp::Div),
        Operator::FloorDiv => Some(BinaryOp::FloorDiv),
        Operator::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}

/// Parses `source` into an expression tree.
///
/// # Example
///
/// ```
/// use sel_core::ast::{BinaryOp, Expr};
/// use sel_core::parser::parse;
///
/// let expr = parse("2 ** 3 ** 2").unwrap();
/// let Expr::Binary { op, right, .. } = expr else { panic!() };
/// assert_eq!(op, BinaryOp::Pow);
/// assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
/// ```
pub fn parse(source: &str) -> Result<Expr, SyntaxError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], with an explicit nesting limit.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Expr, SyntaxError> {
    let tokens = tokenize(source)?;
    let expr = Parser::new(source, &tokens, max_depth).parse()?;
    debug!(source, "Parsed expression");
    Ok(expr)
}
