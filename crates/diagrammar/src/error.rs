//! Error types for Diagrammar operations.
//!
//! [`DiagrammarError`] wraps every recoverable failure of the library: dialect
//! detection, parsing, builder validation and I/O.

use std::io;

use thiserror::Error;

use diagrammar_parser::{DetectError, ParseError};

use crate::builder::{
    ClassValidationError, FlowValidationError, SequenceValidationError, StateValidationError,
};

/// The main error type for Diagrammar operations.
///
/// The `Parse` variant keeps the source text next to the error so that
/// callers can report the failing line.
#[derive(Debug, Error)]
pub enum DiagrammarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown diagram dialect")]
    UnknownDialect,

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    FlowValidation(#[from] FlowValidationError),

    #[error(transparent)]
    ClassValidation(#[from] ClassValidationError),

    #[error(transparent)]
    SequenceValidation(#[from] SequenceValidationError),

    #[error(transparent)]
    StateValidation(#[from] StateValidationError),
}

impl DiagrammarError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Lift a detection failure, attaching `src` to parse errors.
    pub fn from_detect(err: DetectError, src: impl Into<String>) -> Self {
        match err {
            DetectError::UnknownDialect => Self::UnknownDialect,
            DetectError::Parse(err) => Self::new_parse_error(err, src),
        }
    }
}
