//! Canonical pie chart text.

use diagrammar_core::{structure::pie::PieChart, text::format_number};

use super::{quoted, writer::Writer};
use crate::config::RenderOptions;

/// Render a pie chart.
pub fn pie(chart: &PieChart, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header(if chart.show_data { "pie showData" } else { "pie" });
    w.title(&chart.meta);
    w.accessibility(&chart.meta);
    for (label, value) in &chart.sections {
        w.line(format!("{} : {}", quoted(label), format_number(*value)));
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use diagrammar_core::Metadata;

    use super::*;

    #[test]
    fn test_sections_in_insertion_order() {
        let mut chart = PieChart {
            meta: Metadata::default().with_title("Pets").with_acc_title("Pet census"),
            show_data: true,
            ..PieChart::default()
        };
        chart.sections.insert("Dogs".into(), 386.0);
        chart.sections.insert("Cats \"mostly\"".into(), 85.5);

        assert_eq!(
            pie(&chart, &RenderOptions::default()),
            "pie showData\n    title Pets\n    accTitle: Pet census\n    \"Dogs\" : 386\n    \"Cats #quot;mostly#quot;\" : 85.5\n"
        );
    }

    #[test]
    fn test_blank_title_is_omitted() {
        let chart = PieChart {
            meta: Metadata::default().with_title(" "),
            ..PieChart::default()
        };
        assert_eq!(pie(&chart, &RenderOptions::default()), "pie\n");
    }
}
