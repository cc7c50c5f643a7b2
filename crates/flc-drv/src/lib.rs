//! flc-drv - Compiler Driver
//!
//! ============================================================================
//! DRIVER OVERVIEW
//! ============================================================================
//!
//! The driver is the entry point and orchestrator for the whole pipeline.
//! It is responsible for:
//!
//! 1. Reading the one source file the compiler tool takes as its argument.
//! 2. Running the pipeline's stages in order and stopping at the first one
//!    that fails (§7 "no local recovery; each stage either succeeds
//!    completely or terminates the process").
//! 3. Locating and evaluating the entry point.
//! 4. Reporting the result, or a diagnostic, on the way out.
//!
//! ============================================================================
//! PIPELINE
//! ============================================================================
//!
//! ```text
//! Source file (bytes)
//!        │
//!        ▼
//!   [Scanner]      flc-lex   ──▶ token sequence (keep-whitespace)
//!        │
//!        ▼
//!   [Tokens store]  flc-tok  ──▶ parallel kind/span arrays + handles
//!        │
//!        ▼
//!   [Parser]        flc-par  ──▶ post-order token stream
//!        │
//!        ▼
//!   [Symbol table]  flc-interp ──▶ function name → body-start index
//!        │
//!        ▼
//!   [Interpreter]   flc-interp ──▶ a single double
//! ```
//!
//! ============================================================================
//! COMMAND LINE INTERFACE
//! ============================================================================
//!
//! Two tools (§6 "External interfaces"):
//!
//!   flc <path>         Compile and run a file's `Main` function, printing
//!                       `Result: <double>`.
//!   flc-lexer           Reads all of standard input, scans it, and writes
//!                       one debug line per non-whitespace token.
//!
//! ============================================================================
//! ERROR HANDLING
//! ============================================================================
//!
//! Three fatal kinds, none recoverable (§7): input, syntactic, evaluation.
//! Each is reported as a [`Diagnostic`](flc_util::diagnostic::Diagnostic)
//! with its [`DiagnosticCode`](flc_util::diagnostic::DiagnosticCode), and the
//! process exits 1. There are no warnings in this pipeline — every
//! diagnostic the driver ever builds is an error.

use std::fmt;
use std::path::{Path, PathBuf};

use flc_lex::{scan, strip_whitespace};
use flc_par::{parse_postorder, ParseError};
use flc_tok::TokensStore;
use flc_util::diagnostic::{Diagnostic, DiagnosticCode};
use flc_util::span::Span;
use tracing::instrument;

/// The name the pipeline treats as the program's entry point.
pub const ENTRY_POINT: &str = "Main";

/// Driver configuration. Deliberately narrower than a multi-file, multi-emit
/// compiler's `Config` would be: this pipeline compiles exactly one file and
/// always runs it to completion, so there is no `emit`, `opt_level`, or
/// `output_file` to carry (those fields belong to a much larger compiler
/// this front end's spec scopes out).
#[derive(Debug, Clone)]
pub struct Config {
    /// The one source file to compile and run.
    pub source_path: PathBuf,
}

impl Config {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self { source_path: source_path.into() }
    }
}

/// Every way a run of the compiler tool can fail (§7 "Three error kinds").
#[derive(Debug)]
pub enum CompileError {
    /// Input error: missing argument, file not found, or read failure.
    Io(PathBuf, std::io::Error),
    /// Syntactic error: the parser rejected the token stream.
    Syntax(ParseError),
    /// Evaluation error: unknown identifier, stack imbalance, entry
    /// function absent.
    Evaluation(flc_interp::EvalError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io(path, e) => write!(f, "could not read {}: {e}", path.display()),
            CompileError::Syntax(e) => write!(f, "{e}"),
            CompileError::Evaluation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Syntax(e)
    }
}

impl From<flc_interp::EvalError> for CompileError {
    fn from(e: flc_interp::EvalError) -> Self {
        CompileError::Evaluation(e)
    }
}

/// Turns a [`CompileError`] into the [`Diagnostic`] the CLI reports, with
/// the code the error-handling design assigns its kind (§7).
pub fn diagnostic_for(error: &CompileError) -> Diagnostic {
    match error {
        CompileError::Io(_, _) => Diagnostic::error(error.to_string(), Span::DUMMY).with_code(DiagnosticCode::I_FILE),
        CompileError::Syntax(ParseError::UnexpectedEof { .. }) => {
            Diagnostic::error(error.to_string(), Span::DUMMY).with_code(DiagnosticCode::S_UNEXPECTED_EOF)
        }
        CompileError::Syntax(_) => Diagnostic::error(error.to_string(), Span::DUMMY).with_code(DiagnosticCode::S_UNEXPECTED_TOKEN),
        CompileError::Evaluation(flc_interp::EvalError::UnknownIdentifier { .. }) => {
            Diagnostic::error(error.to_string(), Span::DUMMY).with_code(DiagnosticCode::V_UNKNOWN_IDENT)
        }
        CompileError::Evaluation(flc_interp::EvalError::StackImbalance { .. } | flc_interp::EvalError::StackUnderflow) => {
            Diagnostic::error(error.to_string(), Span::DUMMY).with_code(DiagnosticCode::V_STACK_IMBALANCE)
        }
        CompileError::Evaluation(flc_interp::EvalError::FunctionNotFound { name }) if name == ENTRY_POINT => {
            Diagnostic::error(format!("No '{ENTRY_POINT}()' function found"), Span::DUMMY).with_code(DiagnosticCode::V_NO_MAIN)
        }
        CompileError::Evaluation(_) => Diagnostic::error(error.to_string(), Span::DUMMY),
    }
}

/// Runs the whole pipeline over `config.source_path` and returns `Main`'s
/// result. The caller (the `flc` binary) is responsible for printing
/// `Result: <value>` and mapping `Err` to exit code 1.
#[instrument(skip_all, fields(path = %config.source_path.display()))]
pub fn run(config: &Config) -> Result<f64, CompileError> {
    let source = read_source(&config.source_path)?;

    tracing::debug!("scanning");
    let store = TokensStore::build(source.as_bytes(), strip_whitespace(scan(source.as_bytes())));

    tracing::debug!("parsing");
    let postorder = parse_postorder(&store)?;

    tracing::debug!("indexing function declarations");
    let table = flc_interp::SymbolTable::build(&store, postorder.as_slice());
    let body_start = table.resolve(ENTRY_POINT)?;

    tracing::debug!(body_start, "evaluating entry point");
    let mut frame = flc_interp::Frame::new();
    let result = flc_interp::eval_fn(&store, postorder.as_slice(), body_start, &mut frame)?;

    tracing::debug!(result, "evaluation complete");
    Ok(result)
}

#[instrument(skip_all)]
fn read_source(path: &Path) -> Result<String, CompileError> {
    std::fs::read_to_string(path).map_err(|e| CompileError::Io(path.to_path_buf(), e))
}
