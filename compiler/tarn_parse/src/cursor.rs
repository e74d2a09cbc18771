//! Token cursor for navigating the token stream.

use crate::ParseError;
use tarn_diagnostic::ErrorCode;
use tarn_ir::{Name, Span, Token, TokenKind, TokenList};

/// Cursor over a lexed token stream.
///
/// Invariant: the stream ends with `Eof` and the position never moves
/// past it, so `current` is always valid.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            matches!(tokens.as_slice().last(), Some(token) if token.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    /// The current position in the token stream. Compare positions to
    /// see how far an alternative progressed before failing.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reset the position; used when a snapshot is restored.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    /// The current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The current token's kind.
    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// The current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// The previous token's span, or a dummy at the stream start.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Check if at end of the token stream.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        *self.current_kind() == TokenKind::Eof
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Check if the current token is an identifier.
    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Move to the next token; never moves past `Eof`.
    pub fn advance(&mut self) -> &Token {
        let at = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[at]
    }

    /// Consume a token of the given kind or fail.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(ParseError::new(
                ErrorCode::E1001,
                format!("expected {kind}, found {}", self.current_kind()),
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier, returning its (possibly dotted) name.
    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(text) => {
                let name = Name::dotted(text);
                self.advance();
                Ok(name)
            }
            other => Err(ParseError::new(
                ErrorCode::E1003,
                format!("expected an identifier, found {other}"),
                self.current_span(),
            )),
        }
    }

    /// Consume a user operator symbol.
    pub fn expect_op(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Op(text) => {
                let op = text.clone();
                self.advance();
                Ok(op)
            }
            other => Err(ParseError::new(
                ErrorCode::E1004,
                format!("expected an operator, found {other}"),
                self.current_span(),
            )),
        }
    }

    /// Consume a natural-number literal.
    pub fn expect_nat(&mut self) -> Result<u64, ParseError> {
        match self.current_kind() {
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                Ok(value)
            }
            other => Err(ParseError::new(
                ErrorCode::E1001,
                format!("expected an integer literal, found {other}"),
                self.current_span(),
            )),
        }
    }
}
