//! Statements shared by several dialects.

use diagrammar_core::{
    Metadata,
    structure::{ClassDef, Direction},
};
use winnow::{
    Parser,
    combinator::{alt, preceded},
    token::take_till,
};

use crate::{
    lexeme::{IResult, keyword, keyword_rest, rest_trimmed, split_list, ws, ws1},
    source::Line,
};

/// Apply an `accTitle:` or `accDescr:` statement. Returns `false` for any other line.
pub(crate) fn metadata_statement(line: &Line<'_>, meta: &mut Metadata) -> bool {
    let Ok((key, value)) = acc_statement.parse(line.text) else {
        return false;
    };
    let value = (!value.is_empty()).then(|| value.to_string());
    match key {
        "accTitle" => meta.acc_title = value,
        _ => meta.acc_descr = value,
    }
    true
}

fn acc_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (
        alt(("accTitle", "accDescr")),
        preceded((ws, ':'), rest_trimmed),
    )
        .parse_next(input)
}

/// `title text`, returning the text.
pub(crate) fn title_statement<'s>(line: &Line<'s>) -> Option<&'s str> {
    keyword_rest("title").parse(line.text).ok()
}

/// `direction LR`
pub(crate) fn direction_statement(line: &Line<'_>) -> Option<Direction> {
    preceded((keyword("direction"), ws1), rest_trimmed)
        .parse(line.text)
        .ok()
        .and_then(|dir| dir.parse().ok())
}

/// `classDef a,b fill:#f9f,stroke:#333`, one definition per name.
pub(crate) fn class_def_statement(line: &Line<'_>) -> Option<Vec<ClassDef>> {
    let (names, props) = class_def.parse(line.text).ok()?;
    let props = split_list(props.trim_end_matches(';'));
    Some(
        split_list(names)
            .into_iter()
            .map(|name| ClassDef::new(name, props.iter().cloned()))
            .collect(),
    )
}

fn class_def<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    preceded(
        (keyword("classDef"), ws1),
        (take_till(1.., [' ', '\t']), preceded(ws1, rest_trimmed)),
    )
    .parse_next(input)
}

/// `class a,b name`, returning the targets and the class name.
pub(crate) fn class_assignment_statement(line: &Line<'_>) -> Option<(Vec<String>, String)> {
    let (targets, class) = preceded(
        (keyword("class"), ws1),
        (take_till(1.., [' ', '\t']), preceded(ws1, rest_trimmed)),
    )
    .parse(line.text)
    .ok()?;
    let class = class.trim_end_matches(';').trim();
    (!class.is_empty() && !class.contains(char::is_whitespace))
        .then(|| (split_list(targets), class.to_string()))
}
