//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use falcon_diagnostic::{Diagnostic, ErrorKind};
use falcon_ir::{Span, Token, TokenKind};
use std::mem::discriminant;
use tracing::trace;

/// Cursor over the lexer's token vector.
///
/// The final token is always `Eof`; grammar rules check the current kind
/// before advancing, so the cursor never runs past it.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    ///
    /// # Panics
    /// Panics unless the stream ends with `Eof`; the lexer always
    /// terminates its output with one.
    pub fn new(tokens: &'a [Token]) -> Self {
        assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        debug_assert!(self.pos < self.tokens.len(), "cursor position out of bounds");
        &self.tokens[self.pos]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Peek at the token kind at offset `n` from the current position.
    ///
    /// `peek_kind_at(0)` is the current token. Returns `Eof` past the end.
    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> &TokenKind {
        static EOF: TokenKind = TokenKind::Eof;
        if self.pos + n < self.tokens.len() {
            &self.tokens[self.pos + n].kind
        } else {
            &EOF
        }
    }

    /// Peek at the first non-newline token kind without consuming
    /// anything. Used to decide whether a continuation keyword
    /// (`elseif`, `else`, `catch`) on a following line belongs to the
    /// construct being parsed.
    pub fn peek_past_newlines(&self) -> &TokenKind {
        let mut n = 0;
        loop {
            let kind = self.peek_kind_at(n);
            if !matches!(kind, TokenKind::Newline) {
                return kind;
            }
            n += 1;
        }
    }

    /// Check if the current token matches the given kind.
    ///
    /// Compares discriminants, so payload-carrying kinds match regardless
    /// of their payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    /// Check if the current token matches any of the given kinds.
    #[inline]
    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|k| self.check(k))
    }

    /// Check if at end of token stream.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advance to the next token and return the consumed token.
    #[inline]
    pub fn advance(&mut self) -> &Token {
        debug_assert!(
            self.pos + 1 < self.tokens.len(),
            "advance past end of token stream"
        );
        let token = &self.tokens[self.pos];
        trace!(
            pos = self.pos,
            kind = token.kind.surface(),
            "advance"
        );
        self.pos += 1;
        token
    }

    /// Consume the current token if it matches, reporting which way it went.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with a `ParseError`.
    ///
    /// `context` describes the construct being parsed and lands in the
    /// error message.
    pub fn expect(&mut self, kind: &TokenKind, context: &str) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(Diagnostic::new(
                ErrorKind::Parse,
                format!(
                    "expected '{}' {context}, found {}",
                    kind.surface(),
                    self.current_kind().describe()
                ),
            )
            .with_span(self.current_span()))
        }
    }

    /// Consume an identifier token or fail with a `ParseError`.
    pub fn expect_ident(&mut self, context: &str) -> Result<(String, Span), Diagnostic> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.current_span();
                self.advance();
                Ok((name, span))
            }
            other => Err(Diagnostic::new(
                ErrorKind::Parse,
                format!("expected identifier {context}, found {}", other.describe()),
            )
            .with_span(self.current_span())),
        }
    }

    /// Consume a string literal token or fail with a `ParseError`.
    pub fn expect_str(&mut self, context: &str) -> Result<(String, Span), Diagnostic> {
        match self.current_kind() {
            TokenKind::Str(text) => {
                let text = text.clone();
                let span = self.current_span();
                self.advance();
                Ok((text, span))
            }
            other => Err(Diagnostic::new(
                ErrorKind::Parse,
                format!(
                    "expected string literal {context}, found {}",
                    other.describe()
                ),
            )
            .with_span(self.current_span())),
        }
    }

    /// Skip over any run of newline tokens.
    #[inline]
    pub fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }
}
