//! Canonical quadrant chart text.

use std::borrow::Cow;

use diagrammar_core::{
    structure::quadrant::{AxisLabels, QuadrantChart, QuadrantPoint},
    text::format_number,
};

use super::{
    quoted,
    writer::{Writer, non_empty},
};
use crate::config::RenderOptions;

/// Render a quadrant chart.
pub fn quadrant(chart: &QuadrantChart, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header("quadrantChart");
    w.title(&chart.meta);
    w.accessibility(&chart.meta);
    for (axis, labels) in [("x-axis", &chart.x_axis), ("y-axis", &chart.y_axis)] {
        if let Some(text) = axis_text(labels) {
            w.line(format!("{axis} {text}"));
        }
    }
    for (i, text) in chart.quadrants.iter().enumerate() {
        if let Some(text) = non_empty(text) {
            w.line(format!("quadrant-{} {text}", i + 1));
        }
    }
    for point in &chart.points {
        w.line(point_text(point));
    }
    w.finish()
}

/// `Start --> End`, `Start` or `--> End`.
fn axis_text(labels: &AxisLabels) -> Option<String> {
    fn label(text: &str) -> Cow<'_, str> {
        if text.starts_with('"') {
            Cow::Owned(quoted(text))
        } else {
            Cow::Borrowed(text)
        }
    }
    match (non_empty(&labels.start), non_empty(&labels.end)) {
        (Some(start), Some(end)) => Some(format!("{} --> {}", label(start), label(end))),
        (Some(start), None) => Some(label(start).into_owned()),
        (None, Some(end)) => Some(format!("--> {}", label(end))),
        (None, None) => None,
    }
}

/// `Campaign A:::hot: [0.3, 0.6]`
fn point_text(point: &QuadrantPoint) -> String {
    let name = point.name.trim();
    let mut text = if name.contains(':') || name.starts_with('"') {
        quoted(name)
    } else {
        name.to_string()
    };
    if let Some(class) = &point.class {
        text.push_str(":::");
        text.push_str(class);
    }
    text.push_str(&format!(
        ": [{}, {}]",
        format_number(point.x),
        format_number(point.y)
    ));
    text
}

#[cfg(test)]
mod tests {
    use diagrammar_core::Metadata;

    use super::*;

    fn point(name: &str, class: Option<&str>, x: f64, y: f64) -> QuadrantPoint {
        QuadrantPoint {
            name: name.into(),
            class: class.map(str::to_string),
            x,
            y,
        }
    }

    #[test]
    fn test_full_chart() {
        let chart = QuadrantChart {
            meta: Metadata::default().with_title("Reach"),
            x_axis: AxisLabels {
                start: Some("Low".into()),
                end: Some("High".into()),
            },
            y_axis: AxisLabels {
                start: None,
                end: Some("Engaged".into()),
            },
            quadrants: [Some("Expand".into()), None, None, Some("Drop".into())],
            points: vec![
                point("Campaign A", Some("hot"), 0.3, 0.6),
                point("B: reprise", None, 1.0, 0.0),
            ],
        };

        assert_eq!(
            quadrant(&chart, &RenderOptions::default()),
            "quadrantChart\n    title Reach\n    x-axis Low --> High\n    y-axis --> Engaged\n    quadrant-1 Expand\n    quadrant-4 Drop\n    Campaign A:::hot: [0.3, 0.6]\n    \"B: reprise\": [1, 0]\n"
        );
    }

    #[test]
    fn test_axis_forms() {
        let labels = |start: Option<&str>, end: Option<&str>| AxisLabels {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        };
        assert_eq!(axis_text(&labels(Some("Left"), None)).as_deref(), Some("Left"));
        assert_eq!(
            axis_text(&labels(Some("\"odd\""), None)).as_deref(),
            Some("\"#quot;odd#quot;\"")
        );
        assert_eq!(
            axis_text(&labels(Some("Low"), Some("\"High\""))).as_deref(),
            Some("Low --> \"#quot;High#quot;\"")
        );
        assert_eq!(axis_text(&labels(None, Some("Up"))).as_deref(), Some("--> Up"));
        assert_eq!(axis_text(&labels(None, None)), None);
    }
}
