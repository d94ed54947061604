//! Canonical renderers.
//!
//! Every renderer is a pure, total function of a structure and a
//! [`RenderOptions`] value. Rendering canonicalises: parsing the output and
//! rendering it again with the same options reproduces it byte for byte.
//!
//! ```
//! # use diagrammar::{RenderOptions, render};
//! # use diagrammar_core::structure::{Direction, flowchart::{FlowLink, Flowchart}};
//! let mut chart = Flowchart::new(Direction::LeftToRight);
//! chart.links.push(FlowLink::new("A", "B"));
//! let text = render::flowchart(&chart, &RenderOptions::default());
//! assert_eq!(text, "flowchart LR\n    A --> B\n");
//! ```

mod class;
mod er;
mod flowchart;
mod journey;
mod mindmap;
mod pie;
mod quadrant;
mod sankey;
mod sequence;
mod state;
mod timeline;
mod writer;
mod xychart;

pub use class::class;
pub use er::er;
pub use flowchart::flowchart;
pub use journey::journey;
pub use mindmap::mindmap;
pub use pie::pie;
pub use quadrant::quadrant;
pub use sankey::sankey;
pub use sequence::sequence;
pub use state::state;
pub use timeline::timeline;
pub use xychart::xychart;

use diagrammar_core::{Diagram, text::encode_entities};
use log::trace;

use crate::{config::RenderOptions, dispatch};

/// Render any diagram in its dialect's canonical form.
pub fn render(diagram: &Diagram, options: &RenderOptions) -> String {
    let tag = diagram.tag();
    let text = (dispatch::ops(tag).render)(diagram, options);
    trace!(dialect:? = tag, bytes = text.len(); "Rendered diagram");
    text
}

/// Style properties as written after `classDef`, `style` and `linkStyle`.
///
/// An empty list is written as a lone `,` so the statement still parses.
fn style_list(properties: &[String]) -> String {
    if properties.is_empty() {
        return ",".to_string();
    }
    properties.join(",")
}

/// `"text"` with embedded quotes written as entities.
fn quoted(text: &str) -> String {
    format!("\"{}\"", encode_entities(text))
}

/// Apply the `sort_entities` option to a list of declarations.
fn declaration_order<'a, T: ?Sized>(
    mut items: Vec<&'a T>,
    options: &RenderOptions,
    id: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    if options.sort_entities() {
        items.sort_by(|a, b| id(*a).cmp(id(*b)));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_list() {
        assert_eq!(style_list(&[]), ",");
        assert_eq!(
            style_list(&["fill:#f9f".to_string(), "stroke:#333".to_string()]),
            "fill:#f9f,stroke:#333"
        );
    }

    #[test]
    fn test_declaration_order_sorts_on_request() {
        let ids = vec!["b", "a", "c"];
        let options = RenderOptions::default();
        assert_eq!(declaration_order(ids.clone(), &options, |s| s), ["b", "a", "c"]);
        let options = options.with_sort_entities(true);
        assert_eq!(declaration_order(ids, &options, |s| s), ["a", "b", "c"]);
    }
}
