//! The tokens store (§3 "Tokens store", §4.2).
//!
//! A pair of parallel arrays — kinds and byte spans — built once from a
//! scan and read many times by the parser, the interpreter, and the
//! driver. Deliberately a dense, slice-per-token store rather than the
//! sparse (data-bearing-tokens-only) array the original source uses, so
//! invariant (a) — kinds and slices have identical length — holds by
//! construction rather than by bookkeeping two differently-sized arrays.

use flc_lex::{ScannedToken, TokenKind};

/// An opaque, store-relative handle to one token. Valid only against the
/// store that produced it (§4.2 "Handle model").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenHandle(u32);

impl TokenHandle {
    #[inline]
    fn from_index(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "token index overflowed u32");
        TokenHandle(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Build once, read many. No deletion between builds (§4.2 "Contract").
pub struct TokensStore<'a> {
    input: &'a [u8],
    kinds: Vec<TokenKind>,
    spans: Vec<(usize, usize)>,
}

impl<'a> TokensStore<'a> {
    /// Builds a store from a scan, consuming the scanned tokens in order.
    /// Pass `flc_lex::scan(input)` for a keep-whitespace store, or
    /// `flc_lex::strip_whitespace(flc_lex::scan(input))` for the
    /// strip-whitespace store every downstream stage actually reads.
    pub fn build(input: &'a [u8], tokens: Vec<ScannedToken>) -> Self {
        let mut kinds = Vec::with_capacity(tokens.len());
        let mut spans = Vec::with_capacity(tokens.len());

        for token in tokens {
            kinds.push(token.kind);
            spans.push((token.start, token.end));
        }

        Self { input, kinds, spans }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn handle_at(&self, position: usize) -> Option<TokenHandle> {
        (position < self.kinds.len()).then(|| TokenHandle::from_index(position))
    }

    pub fn position_of(&self, handle: TokenHandle) -> usize {
        handle.index()
    }

    pub fn kind(&self, handle: TokenHandle) -> TokenKind {
        self.kinds[handle.index()]
    }

    pub fn slice(&self, handle: TokenHandle) -> &'a [u8] {
        let (start, end) = self.spans[handle.index()];
        &self.input[start..end]
    }

    /// The slice as a `&str`; panics if the span isn't valid UTF-8, which
    /// cannot happen for any kind the scanner produces (§6 "8-bit bytes;
    /// identifiers restricted to ASCII").
    pub fn text(&self, handle: TokenHandle) -> &'a str {
        std::str::from_utf8(self.slice(handle)).expect("token span is not valid UTF-8")
    }

    pub fn span_of(&self, handle: TokenHandle) -> (usize, usize) {
        self.spans[handle.index()]
    }

    pub fn iter(&self) -> TokenIter<'_, 'a> {
        TokenIter { store: self, front: 0, back: self.len() }
    }

    pub fn first(&self) -> Option<TokenHandle> {
        self.handle_at(0)
    }
}

/// A bidirectional cursor over a store's handles (§4.2 "forward/bidirectional
/// iteration").
#[derive(Clone)]
pub struct TokenIter<'s, 'a> {
    store: &'s TokensStore<'a>,
    front: usize,
    back: usize,
}

impl<'s, 'a> Iterator for TokenIter<'s, 'a> {
    type Item = TokenHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let handle = TokenHandle::from_index(self.front);
        self.front += 1;
        Some(handle)
    }
}

impl<'s, 'a> DoubleEndedIterator for TokenIter<'s, 'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(TokenHandle::from_index(self.back))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flc_lex::scan;

    fn build(input: &str) -> TokensStore<'_> {
        TokensStore::build(input.as_bytes(), scan(input.as_bytes()))
    }

    #[test]
    fn kinds_and_spans_have_identical_length() {
        let store = build("def Main(): { return 1; };");
        assert_eq!(store.kinds.len(), store.spans.len());
    }

    #[test]
    fn round_trip_reconstructs_input() {
        let input = "def Main(): { return 1 + 2; };";
        let store = build(input);
        let rebuilt: Vec<u8> = store.iter().flat_map(|h| store.slice(h)).copied().collect();
        assert_eq!(rebuilt, input.as_bytes());
    }

    #[test]
    fn forward_and_backward_iteration_agree_in_reverse() {
        let store = build("a + b");
        let forward: Vec<_> = store.iter().collect();
        let mut backward: Vec<_> = store.iter().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn handle_resolves_kind_and_text() {
        let store = build("myVar");
        let handle = store.first().unwrap();
        assert_eq!(store.kind(handle), flc_lex::TokenKind::Ident);
        assert_eq!(store.text(handle), "myVar");
    }
}
