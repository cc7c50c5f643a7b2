//! Syntactic errors (§7 "Syntactic error"). Both parser shapes report
//! through this one type; there is no recovery, so the first error a
//! caller sees is also the last (§4.3 "Error policy").

use flc_lex::TokenKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected token at position {position}: expected {expected}, found {found:?}")]
    UnexpectedToken { position: usize, expected: &'static str, found: TokenKind },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid integer literal: {slice:?}")]
    InvalidIntLit { slice: String },

    #[error("invalid real literal: {slice:?}")]
    InvalidRealLit { slice: String },
}

pub type ParseResult<T> = Result<T, ParseError>;
