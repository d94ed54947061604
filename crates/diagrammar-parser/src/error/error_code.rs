//! Error codes for Diagrammar parse errors.
//!
//! Error codes are organized by family:
//! - `E1xx` - Statement syntax
//! - `E2xx` - Literals
//! - `E3xx` - Tree structure
//! - `E9xx` - Grammar engine

use std::fmt;

/// Error codes for categorizing parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected statement.
    ///
    /// The line is not a statement of the dialect being parsed.
    E100,

    /// Unterminated block.
    ///
    /// A block (`subgraph`, `loop`, `{`, front matter) was opened but the
    /// input ended before it was closed.
    E101,

    /// Unexpected block terminator.
    ///
    /// An `end` or `}` was found with no open block to close.
    E102,

    /// Reserved identifier.
    ///
    /// A statement keyword such as `end` or `subgraph` was used as a node id.
    E103,

    // =========================================================================
    // Literal Errors (E2xx)
    // =========================================================================
    /// Invalid number.
    E200,

    /// Unterminated string literal.
    ///
    /// A quote was opened but never closed on the same line.
    E201,

    /// Negative value.
    ///
    /// A value that must be non-negative (pie slice, sankey flow, journey score) was negative.
    E202,

    // =========================================================================
    // Structure Errors (E3xx)
    // =========================================================================
    /// Multiple roots.
    ///
    /// A mind map line is indented no deeper than the root.
    E300,

    /// Bad indentation.
    ///
    /// An indentation prefix mixes tabs and spaces.
    E301,

    // =========================================================================
    // Engine Errors (E9xx)
    // =========================================================================
    /// Grammar engine not initialised.
    ///
    /// A synchronous parse was requested for a dialect whose grammar engine has
    /// not completed its asynchronous setup. Call `init_engines` first.
    E900,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E900 => "E900",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected statement",
            ErrorCode::E101 => "unterminated block",
            ErrorCode::E102 => "unexpected block terminator",
            ErrorCode::E103 => "reserved identifier",
            ErrorCode::E200 => "invalid number",
            ErrorCode::E201 => "unterminated string",
            ErrorCode::E202 => "negative value",
            ErrorCode::E300 => "multiple roots",
            ErrorCode::E301 => "bad indentation",
            ErrorCode::E900 => "grammar engine not initialised",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
