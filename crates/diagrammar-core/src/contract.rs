//! Unreachable-state assertions.
//!
//! Parse and validation failures are recoverable and travel through `Result`.
//! A structure that reaches a component in a state no producer can create
//! (for example a dispatch entry handed the wrong dialect variant) is a bug in
//! the producer, and is reported through [`violation`] instead.

use std::fmt;

use log::error;

/// Abort on a broken programming contract.
///
/// The message is logged before panicking so that the failure is visible even
/// when the panic is caught further up.
///
/// # Panics
///
/// Always.
#[track_caller]
#[cold]
pub fn violation(what: impl fmt::Display) -> ! {
    error!(contract = what.to_string(); "Contract violation");
    panic!("contract violation: {what}");
}

/// Format-style wrapper around [`violation`].
///
/// ```should_panic
/// use diagrammar_core::contract_violation;
///
/// contract_violation!("renderer for {} received {}", "pie", "flowchart");
/// ```
#[macro_export]
macro_rules! contract_violation {
    ($($arg:tt)*) => {
        $crate::contract::violation(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "contract violation: wrong variant")]
    fn test_violation_panics_with_message() {
        violation("wrong variant");
    }

    #[test]
    #[should_panic(expected = "contract violation: expected pie, got sankey")]
    fn test_macro_formats_arguments() {
        crate::contract_violation!("expected {}, got {}", "pie", "sankey");
    }
}
