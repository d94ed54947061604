//! Canonical XY chart text.

use diagrammar_core::{
    structure::xychart::{Axis, AxisKind, Orientation, Series, XyChart},
    text::format_number,
};
use diagrammar_parser::records::write_field;

use super::{
    quoted,
    writer::{Writer, non_empty},
};
use crate::config::RenderOptions;

/// Render an XY chart. Titles are always quoted.
pub fn xychart(chart: &XyChart, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header(match chart.orientation {
        Orientation::Vertical => "xychart-beta",
        Orientation::Horizontal => "xychart-beta horizontal",
    });
    if let Some(title) = non_empty(&chart.meta.title) {
        w.line(format!("title {}", quoted(title)));
    }
    w.accessibility(&chart.meta);
    for (keyword, axis) in [("x-axis", &chart.x_axis), ("y-axis", &chart.y_axis)] {
        if let Some(text) = axis_text(axis) {
            w.line(format!("{keyword} {text}"));
        }
    }
    for series in &chart.series {
        w.line(series_text(series));
    }
    w.finish()
}

/// `"Month" [jan, feb]`, `"Revenue" 0 --> 100`, or `None` for an empty axis.
fn axis_text(axis: &Axis) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(title) = &axis.title {
        parts.push(quoted(title));
    }
    match &axis.kind {
        AxisKind::None => {}
        AxisKind::Categories(categories) => {
            let fields: Vec<_> = categories.iter().map(|c| write_field(c)).collect();
            parts.push(format!("[{}]", fields.join(", ")));
        }
        AxisKind::Range { min, max } => {
            parts.push(format!("{} --> {}", format_number(*min), format_number(*max)));
        }
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// `bar "Sales" [1, 2.5, 3]`
fn series_text(series: &Series) -> String {
    let values: Vec<String> = series.values.iter().map(|v| format_number(*v)).collect();
    match &series.title {
        Some(title) => format!(
            "{} {} [{}]",
            series.kind.keyword(),
            quoted(title),
            values.join(", ")
        ),
        None => format!("{} [{}]", series.kind.keyword(), values.join(", ")),
    }
}
