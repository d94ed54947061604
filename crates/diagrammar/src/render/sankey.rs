//! Canonical sankey text: one delimited record per flow.

use diagrammar_core::{structure::sankey::SankeyDiagram, text::format_number};
use diagrammar_parser::records::write_field;

use super::writer::Writer;
use crate::config::RenderOptions;

/// Render a sankey diagram.
pub fn sankey(diagram: &SankeyDiagram, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&diagram.meta);
    w.header("sankey-beta");
    w.accessibility(&diagram.meta);
    for link in &diagram.links {
        w.line(format!(
            "{},{},{}",
            write_field(&link.source),
            write_field(&link.target),
            format_number(link.value)
        ));
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_escaped() {
        let mut diagram = SankeyDiagram::default();
        diagram.add_flow("Agricultural 'waste'", "Bio-conversion", 124.729);
        diagram.add_flow("Heat, waste", "Losses \"lost\"", 26.0);

        assert_eq!(
            sankey(&diagram, &RenderOptions::default()),
            "sankey-beta\n    Agricultural 'waste',Bio-conversion,124.729\n    \"Heat, waste\",\"Losses \"\"lost\"\"\",26\n"
        );
    }
}
