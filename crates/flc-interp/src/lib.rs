//! The interpreter (§4.4): a restricted tree-walking evaluator over a
//! function's post-order token stream, plus the function symbol table
//! collaborator (§4.5) that resolves a name to a body-start index.
//!
//! Deliberately narrow: no function calls, no structs, no lambdas are
//! ever executed, only parsed. Everything this crate evaluates is the
//! numeric subset — literals, identifier lookup, `+ - * /`, `let`-bound
//! locals, and `return`.

mod error;
mod frame;
mod interpreter;
mod symtab;

pub use error::{EvalError, EvalResult};
pub use frame::Frame;
pub use interpreter::eval_fn;
pub use symtab::SymbolTable;
