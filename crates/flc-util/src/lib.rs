//! Shared infrastructure for the `flc` compiler front end: string interning,
//! source spans, diagnostics, and the typed-index vector the tokens store is
//! built on.

pub mod diagnostic;
pub mod error;
pub mod idx;
pub mod span;
pub mod symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use symbol::Symbol;
