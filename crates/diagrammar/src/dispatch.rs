//! Dialect dispatch table.
//!
//! One [`DialectOps`] entry per [`DialectTag`], looked up by an exhaustive
//! match so that adding a dialect without an entry does not compile.

use diagrammar_core::{Diagram, DialectTag, contract_violation};
use diagrammar_parser::{self as parser, ParseError};

use crate::{config::RenderOptions, render};

/// Parse and render operations of one dialect.
pub(crate) struct DialectOps {
    pub(crate) parse: fn(&str) -> Result<Diagram, ParseError>,
    pub(crate) render: fn(&Diagram, &RenderOptions) -> String,
    /// The parser needs the asynchronous grammar engine.
    pub(crate) asynchronous: bool,
}

macro_rules! dialect_ops {
    ($($ops:ident: $variant:ident => $module:ident, $asynchronous:literal;)*) => {
        $(
            static $ops: DialectOps = DialectOps {
                parse: |text| parser::$module::parse(text).map(Diagram::from),
                render: |diagram, options| match diagram {
                    Diagram::$variant(structure) => render::$module(structure, options),
                    other => contract_violation!(
                        "{} renderer received a {} diagram",
                        stringify!($module),
                        other.tag()
                    ),
                },
                asynchronous: $asynchronous,
            };
        )*

        /// The operations for `tag`.
        pub(crate) fn ops(tag: DialectTag) -> &'static DialectOps {
            match tag {
                $(DialectTag::$variant => &$ops,)*
            }
        }
    };
}

dialect_ops! {
    FLOWCHART: Flowchart => flowchart, false;
    CLASS: Class => class, false;
    SEQUENCE: Sequence => sequence, false;
    STATE: State => state, false;
    PIE: Pie => pie, true;
    ER: Er => er, false;
    MINDMAP: Mindmap => mindmap, false;
    QUADRANT: Quadrant => quadrant, false;
    SANKEY: Sankey => sankey, false;
    TIMELINE: Timeline => timeline, false;
    JOURNEY: Journey => journey, false;
    XY_CHART: XyChart => xychart, false;
}
