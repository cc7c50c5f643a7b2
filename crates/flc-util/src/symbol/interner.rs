//! Process-global string interner.
//!
//! Identifiers recur constantly across a source file (parameter names,
//! `let` bindings, the handful of keywords) and both the interpreter's
//! environment map and the driver's function table key on them, so this
//! follows the teacher's lock-free `DashMap` interner rather than handing
//! every consumer its own `HashMap<String, _>`.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::Symbol;

/// Symbols below this index are the language's fixed keyword set, pre-interned
/// at startup so they always have the same stable index across runs.
const RESERVED_SYMBOLS_END: u32 = 8;

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Linear-probe offset used to relocate a string whose hash collided with a
/// different string already occupying that slot (teacher's
/// `faxc-util::symbol::interner::handle_collision`).
const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;
const MAX_PROBES: u64 = 32;

pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self { map: DashMap::with_capacity(64), next_index: AtomicU32::new(RESERVED_SYMBOLS_END) }
    }

    fn initialize_known_symbols(&self) {
        for (idx, name) in ["def", "let", "return"].iter().enumerate() {
            let leaked: &'static str = Box::leak(name.to_string().into_boxed_str());
            let hash = Self::hash_string(name);
            self.map.insert(hash, (leaked, idx as u32));
        }
    }

    fn hash_string(value: &str) -> u64 {
        let mut hasher = AHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }

    /// Interns `value`, returning its existing `Symbol` if already known.
    ///
    /// Every lookup and insert verifies the stored string actually equals
    /// `value` rather than trusting the hash alone — two distinct strings
    /// that collide under `AHash` must not be handed the same `Symbol`. A
    /// collision is resolved by linear-probing to a fresh slot, mirroring
    /// the teacher's `handle_collision`.
    pub fn intern(&self, value: &str) -> Symbol {
        let hash = Self::hash_string(value);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == value {
                return Symbol { index: entry.value().1 };
            }
        } else {
            let leaked: &'static str = Box::leak(value.to_string().into_boxed_str());
            let index = self.next_index.fetch_add(1, Ordering::Relaxed);
            self.map.insert(hash, (leaked, index));
            return Symbol { index };
        }

        self.handle_collision(value, hash)
    }

    /// Probes past a hash collision to either find `value` already interned
    /// under a relocated slot or to claim the first free one.
    fn handle_collision(&self, value: &str, original_hash: u64) -> Symbol {
        for i in 1..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));
            match self.map.get(&probe_hash) {
                Some(entry) if entry.value().0 == value => return Symbol { index: entry.value().1 },
                Some(_) => continue,
                None => {
                    let leaked: &'static str = Box::leak(value.to_string().into_boxed_str());
                    let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                    self.map.insert(probe_hash, (leaked, index));
                    return Symbol { index };
                }
            }
        }

        unreachable!("exhausted {MAX_PROBES} probes resolving a hash collision for {value:?}");
    }

    pub fn get(&self, symbol: Symbol) -> &'static str {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
            .expect("symbol was not produced by this table")
    }
}
