//! Canonical timeline text.

use diagrammar_core::structure::timeline::{Period, Timeline};

use super::writer::Writer;
use crate::config::RenderOptions;

/// Render a timeline.
pub fn timeline(timeline: &Timeline, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header("timeline");
    w.title(&timeline.meta);
    w.accessibility(&timeline.meta);
    write_periods(&mut w, &timeline.periods);
    for section in &timeline.sections {
        w.line(format!("section {}", section.name));
        w.nested(|w| write_periods(w, &section.periods));
    }
    w.finish()
}

/// `2004 : Facebook : Google`
fn write_periods(w: &mut Writer<'_>, periods: &[Period]) {
    for period in periods {
        let mut text = period.label.clone();
        for event in &period.events {
            text.push_str(" : ");
            text.push_str(event);
        }
        w.line(text);
    }
}

#[cfg(test)]
mod tests {
    use diagrammar_core::{Metadata, structure::timeline::TimelineSection};

    use super::*;

    fn period(label: &str, events: &[&str]) -> Period {
        Period {
            label: label.into(),
            events: events.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_periods_and_sections() {
        let timeline = Timeline {
            meta: Metadata::default().with_title("Social media"),
            periods: vec![period("2002", &["LinkedIn"])],
            sections: vec![TimelineSection {
                name: "Later".into(),
                periods: vec![period("2004", &["Facebook", "Google"]), period("2005", &[])],
            }],
        };

        assert_eq!(
            super::timeline(&timeline, &RenderOptions::default()),
            "timeline\n    title Social media\n    2002 : LinkedIn\n    section Later\n        2004 : Facebook : Google\n        2005\n"
        );
    }
}
