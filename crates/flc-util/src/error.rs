//! Shared error types for `flc-util` consumers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

#[derive(Debug, Error)]
pub enum SpanError {
    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },
}

pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
pub type SpanResult<T> = std::result::Result<T, SpanError>;
