//! The scanner (§4.1).
//!
//! A single pass over input bytes producing an ordered token sequence that
//! covers every byte with no gaps and no overlaps. The scanner never fails:
//! unrecognized runs become `Invalid` tokens and downstream stages are the
//! ones that reject them.

use crate::dispatch::kind_for_leading_byte;
use crate::keyword::find_keyword;
use crate::token::TokenKind;

/// One scanned lexeme: its kind and the byte range it spans in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl ScannedToken {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start..self.end]
    }
}

/// Runs the scanner over `input`, keeping whitespace tokens. This is the
/// canonical "keep-whitespace" mode (§4.1); "strip-whitespace" is obtained
/// by filtering its output with [`strip_whitespace`].
pub fn scan(input: &[u8]) -> Vec<ScannedToken> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < input.len() {
        let start = pos;
        let leading = kind_for_leading_byte(input[pos]);
        let kind = consume_one(input, &mut pos, leading);
        tokens.push(ScannedToken { kind, start, end: pos });
    }

    tokens
}

/// Drops whitespace tokens from a keep-whitespace scan, producing the
/// sequence every downstream stage actually consumes.
pub fn strip_whitespace(tokens: Vec<ScannedToken>) -> Vec<ScannedToken> {
    tokens.into_iter().filter(|t| t.kind != TokenKind::Whitespace).collect()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_digit_byte(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Consumes the maximal run starting at `pos` that the dispatch table still
/// maps to `kind`, used for both whitespace and invalid runs.
fn consume_run(input: &[u8], pos: &mut usize, matches_run: impl Fn(u8) -> bool) {
    *pos += 1;
    while *pos < input.len() && matches_run(input[*pos]) {
        *pos += 1;
    }
}

fn consume_one(input: &[u8], pos: &mut usize, leading: TokenKind) -> TokenKind {
    match leading {
        TokenKind::Whitespace => {
            consume_run(input, pos, is_whitespace_byte);
            TokenKind::Whitespace
        }
        TokenKind::Invalid => {
            consume_run(input, pos, |b| kind_for_leading_byte(b) == TokenKind::Invalid);
            TokenKind::Invalid
        }
        TokenKind::Ident => consume_ident(input, pos),
        TokenKind::IntLit => consume_int_lit(input, pos),
        TokenKind::RealLit => {
            consume_real_lit_tail(input, pos);
            TokenKind::RealLit
        }
        TokenKind::StringLit => consume_string_lit(input, pos),
        TokenKind::Minus => consume_minus_or_arrow(input, pos),
        TokenKind::FnOutro => consume_colon_or_type_sep(input, pos),
        other => consume_literal(input, pos, other),
    }
}

/// Consumes a fixed-spelling literal, falling back to `Invalid` over the
/// remaining input if a multi-byte spelling doesn't fully match — dead code
/// for the current keyword set (every multi-byte literal's first byte is
/// claimed by `Ident`), kept because the token catalog doesn't guarantee
/// that forever.
fn consume_literal(input: &[u8], pos: &mut usize, kind: TokenKind) -> TokenKind {
    let spelling = match kind.attribute() {
        crate::token::KindAttribute::Literal(s) => s.as_bytes(),
        crate::token::KindAttribute::DataBearing => unreachable!("literal consumption on a data-bearing kind"),
    };

    if spelling.len() == 1 {
        *pos += 1;
        return kind;
    }

    if input[*pos..].len() < spelling.len() || &input[*pos..*pos + spelling.len()] != spelling {
        let remaining = input.len() - *pos;
        *pos += remaining;
        return TokenKind::Invalid;
    }

    *pos += spelling.len();
    kind
}

/// `-` upgraded in place to `->` when immediately followed by `>`, mirroring
/// the integer-to-real upgrade the scanner performs for numeric literals.
fn consume_minus_or_arrow(input: &[u8], pos: &mut usize) -> TokenKind {
    if input.get(*pos + 1) == Some(&b'>') {
        *pos += 2;
        TokenKind::Arrow
    } else {
        *pos += 1;
        TokenKind::Minus
    }
}

/// `:` upgraded in place to `::` when immediately followed by a second `:`.
fn consume_colon_or_type_sep(input: &[u8], pos: &mut usize) -> TokenKind {
    if input.get(*pos + 1) == Some(&b':') {
        *pos += 2;
        TokenKind::TypeSep
    } else {
        *pos += 1;
        TokenKind::FnOutro
    }
}

fn consume_ident(input: &[u8], pos: &mut usize) -> TokenKind {
    let start = *pos;
    consume_run(input, pos, is_ident_byte);
    let text = std::str::from_utf8(&input[start..*pos]).expect("identifier bytes are ASCII");

    find_keyword(text).unwrap_or(TokenKind::Ident)
}

/// Consumes the `.` plus any trailing digits of a real literal that starts
/// with the dot (`.5`, `.`), or the tail of one being upgraded from an
/// integer literal (`5.25`, `5.`).
fn consume_real_lit_tail(input: &[u8], pos: &mut usize) {
    *pos += 1; // the '.'
    while *pos < input.len() && is_digit_byte(input[*pos]) {
        *pos += 1;
    }
}

fn consume_int_lit(input: &[u8], pos: &mut usize) -> TokenKind {
    consume_run(input, pos, is_digit_byte);

    if input.get(*pos) == Some(&b'.') {
        consume_real_lit_tail(input, pos);
        TokenKind::RealLit
    } else {
        TokenKind::IntLit
    }
}

/// Consumes a `"..."` run including both quotes, honoring `\\`, `\"`, `\n`,
/// `\t`, `\r` escapes just enough to find the closing quote; unescaping the
/// content is left to whatever stage turns the slice into a string value.
/// An unterminated string consumes to end of input and is reported as
/// `Invalid` by the caller via the slice it spans.
fn consume_string_lit(input: &[u8], pos: &mut usize) -> TokenKind {
    *pos += 1; // opening quote

    loop {
        match input.get(*pos) {
            None => return TokenKind::Invalid,
            Some(b'"') => {
                *pos += 1;
                return TokenKind::StringLit;
            }
            Some(b'\\') => {
                *pos += 1;
                if *pos < input.len() {
                    *pos += 1;
                }
            }
            Some(_) => {
                *pos += 1;
            }
        }
    }
}
