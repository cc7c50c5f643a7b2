//! Diagnostic infrastructure — the project's structured "logging" layer.
//!
//! Every scan/parse/eval failure described in the pipeline's error-handling
//! design is surfaced, in the end, as a [`Diagnostic`]. There is no recovery
//! once one is reported: the three fatal error kinds (input, syntactic,
//! evaluation) each terminate their stage, so there is nothing for a
//! multi-diagnostic collector to accumulate — each stage's `Result` already
//! carries the one error that matters, and `flc-drv` converts it to a
//! `Diagnostic` at the process boundary (see `flc_drv::diagnostic_for`).

mod codes;

pub use codes::DiagnosticCode;

use crate::span::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic message with severity and location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self { level, message: message.into(), span, code: None, notes: Vec::new(), helps: Vec::new() }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.level, code, self.message),
            None => write!(f, "{}: {}", self.level, self.message),
        }
    }
}
