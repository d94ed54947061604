//! Parse errors.
//!
//! Every parser fails fast with a single [`ParseError`] that carries the
//! 1-based line and column of the offending statement and an [`ErrorCode`].
//! [`DetectError`] wraps it for entry points that infer the dialect first.

mod error_code;
mod parse_error;

pub use error_code::ErrorCode;
pub use parse_error::{DetectError, ParseError};
