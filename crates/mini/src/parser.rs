//! Recursive-descent parser
//!
//! A single pass over the token sequence. Statement dispatch is
//! keyword-driven (see [`stmt`]); expressions use one function per
//! precedence tier (see [`expr`]); the application-specific declarations
//! live in [`domain`].

mod domain;
mod expr;
mod stmt;

use log::debug;

use crate::ast::Program;
use crate::error::ParseError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

type ParseResult<T> = Result<T, ParseError>;

/// Parse a token sequence into a program.
///
/// Consumes every token up to the trailing end-of-input marker.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut cursor = TokenCursor::new(tokens);
    let mut body = Vec::new();

    while !cursor.at_end() {
        body.push(stmt::statement(&mut cursor)?);
    }

    debug!("parsed {} top-level statements", body.len());
    Ok(Program { body })
}

/// Build an "expected X, found Y" error at the given token.
fn unexpected(expected: impl Into<String>, found: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.into(),
        found: found.describe(),
        span: found.span,
    }
}

/// Read-only cursor over the token sequence.
///
/// Reads past the end yield a synthetic end-of-input token, so callers
/// never index out of bounds.
pub(crate) struct TokenCursor<'a> {
    tokens: &'a [Token],
    index: usize,
    eof: Token,
}

impl<'a> TokenCursor<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        let span = tokens.last().map(|t| t.span).unwrap_or_default();
        Self {
            tokens,
            index: 0,
            eof: Token::new(TokenKind::Eof, "", span),
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Look `offset` tokens ahead of the current one.
    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.index + offset).unwrap_or(&self.eof)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn span(&self) -> Span {
        self.peek().span
    }

    pub(crate) fn at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    pub(crate) fn advance_if_match(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(crate) fn advance_if_any_match(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail naming what was expected.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        self.advance_if_match(kind)
            .ok_or_else(|| unexpected(kind.describe(), self.peek()))
    }

    /// Consume an identifier and return its spelling.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        self.advance_if_match(TokenKind::Identifier)
            .map(|t| t.lexeme)
            .ok_or_else(|| unexpected(what, self.peek()))
    }
}
