//! Timeline parser (`timeline`).

use diagrammar_core::{
    DialectTag,
    structure::timeline::{Period, Timeline, TimelineSection},
};
use log::debug;
use winnow::Parser;

use crate::{
    common,
    error::ParseError,
    lexeme::keyword_rest,
    source::{self, Line},
};

/// Parse timeline text.
pub fn parse(text: &str) -> Result<Timeline, ParseError> {
    let source = source::prepare(text, DialectTag::Timeline)?;
    let mut timeline = Timeline {
        meta: source.metadata(),
        ..Timeline::default()
    };
    for line in &source.body {
        statement(&mut timeline, line)?;
    }
    debug!(
        periods = timeline.periods.len(),
        sections = timeline.sections.len();
        "Parsed timeline"
    );
    Ok(timeline)
}

fn statement(timeline: &mut Timeline, line: &Line<'_>) -> Result<(), ParseError> {
    if common::metadata_statement(line, &mut timeline.meta) {
        return Ok(());
    }
    if let Some(title) = common::title_statement(line) {
        timeline.meta.title = Some(title.to_string());
        return Ok(());
    }
    if let Ok(name) = keyword_rest("section").parse(line.text) {
        timeline.sections.push(TimelineSection {
            name: name.to_string(),
            periods: Vec::new(),
        });
        return Ok(());
    }

    let periods = match timeline.sections.last_mut() {
        Some(section) => &mut section.periods,
        None => &mut timeline.periods,
    };
    if let Some(continuation) = line.text.strip_prefix(':') {
        let Some(period) = periods.last_mut() else {
            return Err(line.unexpected());
        };
        period.events.extend(events(continuation));
        return Ok(());
    }

    let (label, rest) = line.text.split_once(':').unwrap_or((line.text, ""));
    periods.push(Period {
        label: label.trim().to_string(),
        events: events(rest).collect(),
    });
    Ok(())
}

/// The `:`-separated events of a period line.
fn events(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(':')
        .map(str::trim)
        .filter(|event| !event.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_periods_sections_and_continuations() {
        let timeline = parse(
            "timeline\n    title History of social media\n    2002 : LinkedIn\n    section Growth\n        2004 : Facebook : Google\n             : Flickr\n        2005\n",
        )
        .unwrap();
        assert_eq!(
            timeline.meta.title.as_deref(),
            Some("History of social media")
        );
        assert_eq!(timeline.periods[0].events, vec!["LinkedIn"]);
        let growth = &timeline.sections[0];
        assert_eq!(growth.name, "Growth");
        assert_eq!(growth.periods[0].label, "2004");
        assert_eq!(growth.periods[0].events, vec!["Facebook", "Google", "Flickr"]);
        assert!(growth.periods[1].events.is_empty());
    }

    #[test]
    fn test_continuation_without_period() {
        let err = parse("timeline\n: orphan\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E100, 2));
    }
}
