//! Programmatic construction of flowchart, class, sequence and state diagrams.
//!
//! Builders are owned values: every method takes `self` and returns the
//! builder, and nested scopes are filled through a closure that receives a
//! child builder and hands it back. Nothing is ever removed once added.
//!
//! [`build`](FlowBuilder::build) consumes the builder. With validation enabled
//! (the default) it checks that every identifier a construct refers to has
//! been declared, which the parsers never do.
//!
//! ```
//! use diagrammar::{BuildOptions, builder, structure::{Direction, flowchart::{FlowLink, FlowNode}}};
//!
//! let chart = builder::flow(Direction::LeftToRight)
//!     .node(FlowNode::new("A"))
//!     .subgraph("inner", |sg| sg.node(FlowNode::new("B")))
//!     .link(FlowLink::new("A", "B"))
//!     .build(BuildOptions::default())
//!     .unwrap();
//! assert_eq!(chart.subgraphs[0].nodes, vec!["B"]);
//!
//! let err = builder::flow(Direction::LeftToRight)
//!     .link(FlowLink::new("A", "B"))
//!     .build(BuildOptions::default())
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "unknown node `A` referenced by link A --> B");
//! ```

/// `title`, `acc_title` and `acc_descr` setters for a builder holding a
/// structure with a `meta` field.
macro_rules! metadata_setters {
    ($($field:ident).+) => {
        /// Set the diagram title.
        pub fn title(mut self, title: impl Into<String>) -> Self {
            self.$($field).+.meta.title = Some(title.into());
            self
        }

        /// Set the accessible title.
        pub fn acc_title(mut self, acc_title: impl Into<String>) -> Self {
            self.$($field).+.meta.acc_title = Some(acc_title.into());
            self
        }

        /// Set the accessible description.
        pub fn acc_descr(mut self, acc_descr: impl Into<String>) -> Self {
            self.$($field).+.meta.acc_descr = Some(acc_descr.into());
            self
        }
    };
}

mod class;
mod flowchart;
mod sequence;
mod state;

pub use class::{ClassBuilder, ClassValidationError, NamespaceBuilder};
pub use flowchart::{FlowBuilder, FlowValidationError, SubgraphBuilder};
pub use sequence::{BlockBuilder, SequenceBuilder, SequenceValidationError};
pub use state::{CompositeBuilder, StateBuilder, StateValidationError};

use diagrammar_core::structure::Direction;

/// Start a flowchart laid out in `direction`.
pub fn flow(direction: Direction) -> FlowBuilder {
    FlowBuilder::new(direction)
}

/// Start a class diagram.
pub fn class_diagram() -> ClassBuilder {
    ClassBuilder::default()
}

/// Start a sequence diagram.
pub fn sequence() -> SequenceBuilder {
    SequenceBuilder::default()
}

/// Start a state diagram.
pub fn state() -> StateBuilder {
    StateBuilder::default()
}
