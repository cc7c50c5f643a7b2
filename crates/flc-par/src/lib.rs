//! The parser (§4.3): a recursive-descent implementation of the declarative
//! grammar, exposed in both output shapes the spec documents side by side —
//! a structured AST (`ast_builder`) for a hypothetical future
//! pretty-printer/type-checker, and a flat post-order token stream
//! (`postorder`) the interpreter actually consumes. Converting one into the
//! other is mechanical (§9 "Two parser shapes"); this crate keeps them as
//! two independent passes over the same [`Cursor`] rather than deriving one
//! from the other, since each pass's emission points differ in exactly the
//! places the grammar's structural punctuation does.

pub mod ast;
mod ast_builder;
mod cursor;
mod error;
mod postorder;

pub use ast_builder::parse_file;
pub use error::{ParseError, ParseResult};
pub use postorder::{parse_postorder, PostorderStream};
