//! # Diagrammar Parser
//!
//! Dialect detection and one parser per diagram dialect. Every parser turns
//! source text into the matching [`diagrammar_core::structure`] record.
//!
//! ## Usage
//!
//! ```
//! # use diagrammar_parser::{parse, DetectError};
//! # use diagrammar_core::{Diagram, DialectTag};
//!
//! fn main() -> Result<(), DetectError> {
//!     let diagram = parse("flowchart LR\n    A --> B\n")?;
//!     assert_eq!(diagram.tag(), DialectTag::Flowchart);
//!     Ok(())
//! }
//! ```
//!
//! The pie dialect depends on a grammar engine that is set up asynchronously.
//! Use [`parse_async`] (or call [`init_engines`] once) before parsing pie
//! charts synchronously.

mod common;
mod detect;
mod engine;
mod error;
mod lexeme;
mod source;

pub mod class;
pub mod er;
pub mod flowchart;
pub mod journey;
pub mod mindmap;
pub mod pie;
pub mod quadrant;
pub mod records;
pub mod sankey;
pub mod sequence;
pub mod state;
pub mod timeline;
pub mod xychart;

pub use detect::{
    detect, is_class, is_er, is_flowchart, is_journey, is_mindmap, is_pie, is_quadrant,
    is_sankey, is_sequence, is_state, is_timeline, is_xychart,
};
pub use engine::init_engines;
pub use error::{DetectError, ErrorCode, ParseError};

use diagrammar_core::{Diagram, DialectTag};
use log::{debug, trace};

/// Detect the dialect of `text`, then parse it.
///
/// Fails with [`DetectError::UnknownDialect`] when no header keyword matches.
/// A pie chart only parses once the grammar engine is initialised.
pub fn parse(text: &str) -> Result<Diagram, DetectError> {
    let tag = detect(text).ok_or(DetectError::UnknownDialect)?;
    Ok(parse_as(tag, text)?)
}

/// Parse `text` as the dialect `tag`, skipping detection.
///
/// The header line may be omitted: the whole text is then read as a body.
pub fn parse_as(tag: DialectTag, text: &str) -> Result<Diagram, ParseError> {
    debug!(dialect:? = tag; "Parsing diagram");
    let diagram = match tag {
        DialectTag::Flowchart => flowchart::parse(text)?.into(),
        DialectTag::Class => class::parse(text)?.into(),
        DialectTag::Sequence => sequence::parse(text)?.into(),
        DialectTag::State => state::parse(text)?.into(),
        DialectTag::Pie => pie::parse(text)?.into(),
        DialectTag::Er => er::parse(text)?.into(),
        DialectTag::Mindmap => mindmap::parse(text)?.into(),
        DialectTag::Quadrant => quadrant::parse(text)?.into(),
        DialectTag::Sankey => sankey::parse(text)?.into(),
        DialectTag::Timeline => timeline::parse(text)?.into(),
        DialectTag::Journey => journey::parse(text)?.into(),
        DialectTag::XyChart => xychart::parse(text)?.into(),
    };
    trace!(dialect:? = tag; "Diagram parsed");
    Ok(diagram)
}

/// Like [`parse`], initialising the grammar engine first.
pub async fn parse_async(text: &str) -> Result<Diagram, DetectError> {
    let tag = detect(text).ok_or(DetectError::UnknownDialect)?;
    Ok(parse_as_async(tag, text).await?)
}

/// Like [`parse_as`], initialising the grammar engine first.
pub async fn parse_as_async(tag: DialectTag, text: &str) -> Result<Diagram, ParseError> {
    if tag.is_async() {
        init_engines().await;
    }
    parse_as(tag, text)
}
