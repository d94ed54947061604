//! The ParseError and DetectError types.

use thiserror::Error;

use crate::error::ErrorCode;

/// Malformed input for a specific dialect grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error[{code}] at {line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters including leading indentation.
    pub column: usize,
    pub message: String,
    pub code: ErrorCode,
}

impl ParseError {
    pub fn new(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            code,
        }
    }
}

/// Failure of an entry point that detects the dialect before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    #[error("unknown diagram dialect")]
    UnknownDialect,

    #[error(transparent)]
    Parse(#[from] ParseError),
}
