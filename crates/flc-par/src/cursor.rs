//! A small forward-only cursor over a strip-whitespace [`TokensStore`],
//! shared by both parser shapes. Neither shape needs anything the
//! store's own iterator doesn't already give it except random lookahead
//! by position, which is why this wraps the store directly rather than
//! reusing `TokenIter`.

use flc_lex::TokenKind;
use flc_tok::{TokenHandle, TokensStore};

use crate::error::{ParseError, ParseResult};

pub struct Cursor<'s, 'a> {
    store: &'s TokensStore<'a>,
    pos: usize,
}

impl<'s, 'a> Cursor<'s, 'a> {
    pub fn new(store: &'s TokensStore<'a>) -> Self {
        Cursor { store, pos: 0 }
    }

    pub fn store(&self) -> &'s TokensStore<'a> {
        self.store
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.store.len()
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.store.handle_at(self.pos).map(|h| self.store.kind(h))
    }

    fn peek_handle(&self) -> Option<TokenHandle> {
        self.store.handle_at(self.pos)
    }

    /// Consumes and returns the current token, regardless of kind.
    pub fn bump(&mut self) -> Option<TokenHandle> {
        let handle = self.peek_handle()?;
        self.pos += 1;
        Some(handle)
    }

    /// Consumes the current token if it has the expected kind, else
    /// fails without advancing.
    pub fn expect(&mut self, kind: TokenKind, what: &'static str) -> ParseResult<TokenHandle> {
        match self.peek_handle() {
            Some(handle) if self.store.kind(handle) == kind => {
                self.pos += 1;
                Ok(handle)
            }
            Some(handle) => Err(ParseError::UnexpectedToken {
                position: self.pos,
                expected: what,
                found: self.store.kind(handle),
            }),
            None => Err(ParseError::UnexpectedEof { expected: what }),
        }
    }

    /// Consumes the current token and returns its text if it has the
    /// expected kind.
    pub fn expect_text(&mut self, kind: TokenKind, what: &'static str) -> ParseResult<&'a str> {
        let handle = self.expect(kind, what)?;
        Ok(self.store.text(handle))
    }

    /// Consumes the current token if it matches, returning whether it did.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}
