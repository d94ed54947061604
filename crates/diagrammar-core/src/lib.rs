//! Diagrammar Core Types and Definitions
//!
//! This crate provides the structure model shared by every Diagrammar crate:
//!
//! - **Dialects**: the closed set of supported diagram languages ([`dialect::DialectTag`])
//! - **Diagram**: the tagged union over every dialect structure ([`diagram::Diagram`])
//! - **Structure**: one record type per dialect ([`structure`] module)
//! - **Metadata**: optional title and accessibility text ([`meta::Metadata`])
//! - **Text**: label escaping and number formatting shared by parsers and renderers ([`text`] module)
//! - **Contract**: the unreachable-state assertion used for programming errors ([`contract`] module)

pub mod contract;
pub mod diagram;
pub mod dialect;
pub mod meta;
pub mod structure;
pub mod text;

pub use diagram::Diagram;
pub use dialect::DialectTag;
pub use meta::Metadata;
