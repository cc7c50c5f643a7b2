//! The perfect-hash keyword table (§4.1 "Keyword hashing").
//!
//! After the scanner has consumed a maximal identifier-shaped run, this
//! table decides whether that run is actually one of the three keywords
//! (`def`, `let`, `return`) or one of the four (`def`, `let`, `return`,
//! `struct`) once struct declarations are in scope. Slot collisions between
//! two distinct keywords are a build-time assertion failure, not a runtime
//! concern.

use crate::token::TokenKind;

const NUM_TABLE_ENTRIES: usize = 32;

const fn hash(first_byte: u8) -> usize {
    (first_byte & (NUM_TABLE_ENTRIES as u8 - 1)) as usize
}

struct Entry {
    spelling: &'static str,
    kind: TokenKind,
}

const KEYWORDS: [(&str, TokenKind); 4] =
    [("def", TokenKind::FnIntro), ("let", TokenKind::ValDefIntro), ("return", TokenKind::Return), ("struct", TokenKind::StructIntro)];

const fn build_table() -> [Option<Entry>; NUM_TABLE_ENTRIES] {
    const NONE: Option<Entry> = None;
    let mut table: [Option<Entry>; NUM_TABLE_ENTRIES] = [NONE; NUM_TABLE_ENTRIES];

    let mut i = 0;
    while i < KEYWORDS.len() {
        let (spelling, kind) = KEYWORDS[i];
        let slot = hash(spelling.as_bytes()[0]);
        assert!(table[slot].is_none(), "keyword hash collision in perfect-hash table");
        table[slot] = Some(Entry { spelling, kind });
        i += 1;
    }

    table
}

static TABLE: [Option<Entry>; NUM_TABLE_ENTRIES] = build_table();

/// Looks up `ident` as a keyword, returning its literal kind if it is one.
pub fn find_keyword(ident: &str) -> Option<TokenKind> {
    let Some(&first) = ident.as_bytes().first() else { return None };
    match &TABLE[hash(first)] {
        Some(entry) if entry.spelling == ident => Some(entry.kind),
        _ => None,
    }
}
