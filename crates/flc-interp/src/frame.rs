//! Interpreter frames (§3 "Interpreter frame"): a mapping from local name to
//! double, plus an ordered value stack. One frame per function activation;
//! frames do not outlive the call that created them.

use rustc_hash::FxHashMap;

use crate::error::{EvalError, EvalResult};

/// A function activation's environment and working stack.
#[derive(Debug, Default)]
pub struct Frame {
    locals: FxHashMap<String, f64>,
    stack: Vec<f64>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    /// A frame pre-populated with parameter bindings, in call order.
    pub fn with_bindings<I: IntoIterator<Item = (String, f64)>>(bindings: I) -> Self {
        Frame { locals: bindings.into_iter().collect(), stack: Vec::new() }
    }

    pub fn lookup(&self, name: &str) -> EvalResult<f64> {
        self.locals.get(name).copied().ok_or_else(|| EvalError::UnknownIdentifier { name: name.to_string() })
    }

    pub fn bind(&mut self, name: String, value: f64) {
        self.locals.insert(name, value);
    }

    pub fn push(&mut self, value: f64) {
        self.stack.push(value);
    }

    pub fn pop(&mut self) -> EvalResult<f64> {
        self.stack.pop().ok_or(EvalError::StackUnderflow)
    }

    /// Drains the stack, asserting it holds exactly the statement's one
    /// result value (§4.4 "the stack must contain exactly one value").
    pub fn take_single_result(&mut self) -> EvalResult<f64> {
        if self.stack.len() != 1 {
            let found = self.stack.len();
            self.stack.clear();
            return Err(EvalError::StackImbalance { found });
        }
        Ok(self.stack.pop().unwrap())
    }
}
