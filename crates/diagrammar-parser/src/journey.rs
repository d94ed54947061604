//! User journey parser (`journey`).

use diagrammar_core::{
    DialectTag,
    structure::journey::{Journey, JourneySection, Task},
};
use log::debug;
use winnow::Parser;

use crate::{
    common,
    error::ParseError,
    lexeme::{keyword_rest, split_list},
    source::{self, Line},
};

/// Parse user journey text.
pub fn parse(text: &str) -> Result<Journey, ParseError> {
    let source = source::prepare(text, DialectTag::Journey)?;
    let mut journey = Journey {
        meta: source.metadata(),
        ..Journey::default()
    };
    for line in &source.body {
        statement(&mut journey, line)?;
    }
    debug!(
        tasks = journey.tasks.len(),
        sections = journey.sections.len();
        "Parsed journey"
    );
    Ok(journey)
}

fn statement(journey: &mut Journey, line: &Line<'_>) -> Result<(), ParseError> {
    if common::metadata_statement(line, &mut journey.meta) {
        return Ok(());
    }
    if let Some(title) = common::title_statement(line) {
        journey.meta.title = Some(title.to_string());
        return Ok(());
    }
    if let Ok(name) = keyword_rest("section").parse(line.text) {
        journey.sections.push(JourneySection {
            name: name.to_string(),
            tasks: Vec::new(),
        });
        return Ok(());
    }

    let task = task(line)?;
    match journey.sections.last_mut() {
        Some(section) => section.tasks.push(task),
        None => journey.tasks.push(task),
    }
    Ok(())
}

/// `Make tea: 5: Me, Cat`
fn task(line: &Line<'_>) -> Result<Task, ParseError> {
    let mut parts = line.text.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let score = match parts.next() {
        Some(score) if !name.is_empty() => score,
        _ => return Err(line.unexpected()),
    };
    Ok(Task {
        name: name.to_string(),
        score: line.non_negative(score)?,
        actors: parts.next().map(split_list).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_sections_and_tasks() {
        let journey = parse(
            "journey\n    title My working day\n    Wake up: 1\n    section Go to work\n        Make tea: 5: Me\n        Go upstairs: 3: Me, Cat\n",
        )
        .unwrap();
        assert_eq!(journey.meta.title.as_deref(), Some("My working day"));
        assert_eq!(journey.tasks[0].score, 1.0);
        assert!(journey.tasks[0].actors.is_empty());
        let work = &journey.sections[0];
        assert_eq!(work.name, "Go to work");
        assert_eq!(work.tasks[1].name, "Go upstairs");
        assert_eq!(work.tasks[1].actors, vec!["Me", "Cat"]);
    }

    #[test]
    fn test_task_errors() {
        let err = parse("journey\nNo score here\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E100, 2));
        let err = parse("journey\nTask: -1\n").unwrap_err();
        assert_eq!((err.code, err.column), (ErrorCode::E202, 7));
        let err = parse("journey\nTask: high\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::E200);
    }
}
