//! Option records for rendering and building diagrams.
//!
//! Every option has a stated default, and all records implement
//! [`serde::Deserialize`] so they can be loaded from a configuration file. A
//! partially written record overlays the defaults field by field.
//!
//! # Example
//!
//! ```
//! # use diagrammar::config::{Indent, RenderOptions};
//! let options = RenderOptions::default()
//!     .with_indent(Indent::new("  ").unwrap())
//!     .with_compact_links(true);
//! assert_eq!(options.indent().as_str(), "  ");
//! assert!(!options.sort_entities());
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// One level of indentation in rendered output.
///
/// An indent is a non-empty run of spaces, or of tabs. Mixing the two would
/// make mind map depths ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Indent(String);

impl Indent {
    /// Create an indent unit.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIndent`] if `unit` is empty, mixes spaces with tabs, or
    /// holds anything else.
    pub fn new(unit: impl Into<String>) -> Result<Self, InvalidIndent> {
        let unit = unit.into();
        let uniform = [' ', '\t']
            .into_iter()
            .any(|blank| unit.chars().all(|c| c == blank));
        if unit.is_empty() || !uniform {
            return Err(InvalidIndent(unit));
        }
        Ok(Self(unit))
    }

    /// An indent of `width` spaces, at least one.
    pub fn spaces(width: usize) -> Self {
        Self(" ".repeat(width.max(1)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::spaces(4)
    }
}

impl TryFrom<String> for Indent {
    type Error = InvalidIndent;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An indent unit that is empty or not made of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("indent must be a non-empty run of spaces or of tabs, got {0:?}")]
pub struct InvalidIndent(String);

/// Formatting options for the canonical renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Indentation unit for body statements and nested scopes.
    indent: Indent,

    /// Write flowchart classes as `id:::cls` on the declaration line.
    inline_classes: bool,

    /// Chain consecutive flowchart links that share an endpoint.
    compact_links: bool,

    /// Emit entity declarations in id order instead of insertion order.
    sort_entities: bool,
}

impl RenderOptions {
    /// Creates a new [`RenderOptions`] with every field given.
    ///
    /// # Arguments
    ///
    /// * `indent` - Indentation unit.
    /// * `inline_classes` - Flowchart classes on declaration lines.
    /// * `compact_links` - Chain consecutive flowchart links.
    /// * `sort_entities` - Sort declarations by id.
    pub fn new(
        indent: Indent,
        inline_classes: bool,
        compact_links: bool,
        sort_entities: bool,
    ) -> Self {
        Self {
            indent,
            inline_classes,
            compact_links,
            sort_entities,
        }
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    pub fn inline_classes(&self) -> bool {
        self.inline_classes
    }

    pub fn compact_links(&self) -> bool {
        self.compact_links
    }

    pub fn sort_entities(&self) -> bool {
        self.sort_entities
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_inline_classes(mut self, inline_classes: bool) -> Self {
        self.inline_classes = inline_classes;
        self
    }

    pub fn with_compact_links(mut self, compact_links: bool) -> Self {
        self.compact_links = compact_links;
        self
    }

    pub fn with_sort_entities(mut self, sort_entities: bool) -> Self {
        self.sort_entities = sort_entities;
        self
    }
}

/// Options for the terminal `build` step of a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Check references before producing the structure.
    validate: bool,
}

impl BuildOptions {
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }

    /// Options that skip validation.
    ///
    /// The built structure may then hold dangling references.
    pub fn unchecked() -> Self {
        Self::new(false)
    }

    pub fn validate(&self) -> bool {
        self.validate
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}
