//! Diagrammar - parse, canonically render and build text diagrams.
//!
//! A dozen Mermaid-style dialects (flowchart, class, sequence, state, pie, ER,
//! mind map, quadrant, sankey, timeline, journey and XY chart) are parsed into
//! typed structures and rendered back as canonical text. Rendering is a fixed
//! point: parsing canonical output and rendering it again reproduces it.
//! Four structures can also be built in code through [`builder`].
//!
//! # Examples
//!
//! ```
//! use diagrammar::{Formatter, RenderOptions};
//!
//! let formatter = Formatter::new(RenderOptions::default());
//! let text = formatter.format("graph LR\nA-->B\n").unwrap();
//! assert_eq!(text, "flowchart LR\n    A\n    B\n    A --> B\n");
//! ```

pub mod builder;
pub mod config;
pub mod render;

mod dispatch;
mod error;

pub use diagrammar_core::{Diagram, DialectTag, Metadata, structure};
pub use diagrammar_parser::{
    DetectError, ErrorCode, ParseError, detect, init_engines, is_class, is_er, is_flowchart,
    is_journey, is_mindmap, is_pie, is_quadrant, is_sankey, is_sequence, is_state,
    is_timeline, is_xychart,
};

pub use builder::{class_diagram, flow, sequence, state};
pub use config::{BuildOptions, Indent, RenderOptions};
pub use error::DiagrammarError;
pub use render::render;

use log::{debug, info, trace};

/// Detect the dialect of `text` and parse it.
///
/// # Errors
///
/// Returns [`DiagrammarError::UnknownDialect`] when no header matches, or
/// [`DiagrammarError::Parse`] for a malformed statement. A pie chart fails with
/// [`ErrorCode::E900`] until the grammar engine is initialised; see
/// [`parse_async`].
pub fn parse(text: &str) -> Result<Diagram, DiagrammarError> {
    let tag = detect(text).ok_or(DiagrammarError::UnknownDialect)?;
    parse_as(tag, text)
}

/// Parse `text` as the dialect `tag`, skipping detection.
///
/// # Errors
///
/// Returns [`DiagrammarError::Parse`] for a malformed statement.
pub fn parse_as(tag: DialectTag, text: &str) -> Result<Diagram, DiagrammarError> {
    debug!(dialect:? = tag; "Parsing diagram");
    let diagram = (dispatch::ops(tag).parse)(text)
        .map_err(|err| DiagrammarError::new_parse_error(err, text))?;
    trace!(diagram:?; "Parsed diagram");
    Ok(diagram)
}

/// Like [`parse`], initialising the grammar engine first when the dialect
/// needs it.
///
/// # Errors
///
/// As for [`parse`].
pub async fn parse_async(text: &str) -> Result<Diagram, DiagrammarError> {
    let tag = detect(text).ok_or(DiagrammarError::UnknownDialect)?;
    parse_as_async(tag, text).await
}

/// Like [`parse_as`], initialising the grammar engine first when the dialect
/// needs it.
///
/// # Errors
///
/// As for [`parse_as`].
pub async fn parse_as_async(tag: DialectTag, text: &str) -> Result<Diagram, DiagrammarError> {
    if dispatch::ops(tag).asynchronous {
        init_engines().await;
    }
    parse_as(tag, text)
}

/// Parse-then-render pipeline with fixed options.
///
/// A `Formatter` turns diagram text of any dialect into its canonical form.
///
/// # Examples
///
/// ```
/// use diagrammar::{DialectTag, Formatter, RenderOptions};
///
/// let formatter = Formatter::new(RenderOptions::default().with_sort_entities(true))
///     .with_dialect(DialectTag::Er);
/// let text = formatter.format("B\nA\n").unwrap();
/// assert_eq!(text, "erDiagram\n    A\n    B\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: RenderOptions,
    dialect: Option<DialectTag>,
}

impl Formatter {
    /// Create a formatter that detects the dialect of its input.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            dialect: None,
        }
    }

    /// Parse every input as `dialect` instead of detecting it.
    pub fn with_dialect(mut self, dialect: DialectTag) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Canonical text of `source`.
    ///
    /// # Errors
    ///
    /// Returns `DiagrammarError` if the dialect is unknown or `source` does
    /// not parse.
    pub fn format(&self, source: &str) -> Result<String, DiagrammarError> {
        let diagram = match self.dialect {
            Some(tag) => parse_as(tag, source)?,
            None => parse(source)?,
        };
        Ok(self.render(&diagram))
    }

    /// Like [`Formatter::format`], initialising the grammar engine first when
    /// the dialect needs it.
    ///
    /// # Errors
    ///
    /// As for [`Formatter::format`].
    pub async fn format_async(&self, source: &str) -> Result<String, DiagrammarError> {
        let diagram = match self.dialect {
            Some(tag) => parse_as_async(tag, source).await?,
            None => parse_async(source).await?,
        };
        Ok(self.render(&diagram))
    }

    /// Canonical text of `diagram`.
    pub fn render(&self, diagram: &Diagram) -> String {
        info!(dialect:? = diagram.tag(); "Rendering canonical text");
        render(diagram, &self.options)
    }
}
