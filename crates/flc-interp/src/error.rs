//! Evaluation errors (§7 "Evaluation error"). Every one of these is fatal:
//! the interpreter has no recovery path, matching the parser's "first
//! fault aborts, no recovery" policy (§4.3 "Error policy").

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },

    #[error("value stack underflowed evaluating an operator")]
    StackUnderflow,

    #[error("expression left {found} values on the stack, expected exactly 1")]
    StackImbalance { found: usize },

    #[error("could not parse numeric literal: {slice:?}")]
    InvalidNumericLiteral { slice: String },

    #[error("no function named {name:?} was found")]
    FunctionNotFound { name: String },

    #[error("evaluation reached a {kind} token, which the restricted interpreter does not execute")]
    UnsupportedToken { kind: String },
}

pub type EvalResult<T> = Result<T, EvalError>;
