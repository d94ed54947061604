//! XY chart parser (`xychart-beta`).

use diagrammar_core::{
    DialectTag,
    structure::xychart::{Axis, AxisKind, Orientation, Series, SeriesKind, XyChart},
};
use log::debug;
use winnow::{Parser, combinator::preceded};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{keyword, parse_number, quoted, rest_trimmed, ws},
    records,
    source::{self, Line},
};

/// Parse XY chart text.
pub fn parse(text: &str) -> Result<XyChart, ParseError> {
    let source = source::prepare(text, DialectTag::XyChart)?;
    let mut chart = XyChart {
        meta: source.metadata(),
        ..XyChart::default()
    };
    if let Some(header) = &source.header {
        chart.orientation = match header.text {
            "" => Orientation::Vertical,
            "horizontal" => Orientation::Horizontal,
            _ => return Err(header.unexpected()),
        };
    }
    for line in &source.body {
        statement(&mut chart, line)?;
    }
    debug!(series = chart.series.len(); "Parsed XY chart");
    Ok(chart)
}

fn statement(chart: &mut XyChart, line: &Line<'_>) -> Result<(), ParseError> {
    if common::metadata_statement(line, &mut chart.meta) {
        return Ok(());
    }
    if let Some(title) = common::title_statement(line) {
        chart.meta.title = Some(unquote(title));
        return Ok(());
    }
    if let Some(rest) = arguments("x-axis", line.text) {
        chart.x_axis = axis(line, rest)?;
        return Ok(());
    }
    if let Some(rest) = arguments("y-axis", line.text) {
        chart.y_axis = axis(line, rest)?;
        return Ok(());
    }
    for kind in [SeriesKind::Bar, SeriesKind::Line] {
        if let Some(rest) = arguments(kind.keyword(), line.text) {
            chart.series.push(series(line, kind, rest)?);
            return Ok(());
        }
    }
    Err(line.unexpected())
}

/// Text after `word`, or `None` if the line is another statement.
fn arguments<'s>(word: &'static str, text: &'s str) -> Option<&'s str> {
    preceded((keyword(word), ws), rest_trimmed).parse(text).ok()
}

/// `["title"] [a, b] | min --> max`
fn axis(line: &Line<'_>, text: &str) -> Result<Axis, ParseError> {
    let (title, rest) = leading_title(line, text)?;
    let kind = if rest.is_empty() {
        AxisKind::None
    } else if let Some(inner) = bracketed(rest) {
        let categories = if inner.trim().is_empty() {
            Vec::new()
        } else {
            records::split_record(inner).map_err(|err| {
                line.error(
                    ErrorCode::E201,
                    line.offset_of(inner) + err.offset(),
                    err.to_string(),
                )
            })?
        };
        AxisKind::Categories(categories)
    } else if let Some((min, max)) = rest.split_once("-->") {
        AxisKind::Range {
            min: line.number(min)?,
            max: line.number(max)?,
        }
    } else {
        return Err(line.unexpected());
    };
    Ok(Axis { title, kind })
}

/// `["title"] [1, 2.5, 3]`
fn series(line: &Line<'_>, kind: SeriesKind, text: &str) -> Result<Series, ParseError> {
    let (title, rest) = leading_title(line, text)?;
    let Some(inner) = bracketed(rest) else {
        return Err(line.unexpected());
    };
    let values = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner
            .split(',')
            .map(|value| line.number(value))
            .collect::<Result<_, _>>()?
    };
    Ok(Series {
        kind,
        title,
        values,
    })
}

/// Split an optional quoted or single-word title off the front of `text`.
fn leading_title<'s>(
    line: &Line<'_>,
    text: &'s str,
) -> Result<(Option<String>, &'s str), ParseError> {
    if text.starts_with('"') {
        return match (quoted, ws).parse_peek(text) {
            Ok((rest, (title, ()))) => Ok((Some(title), rest)),
            Err(_) => Err(line.unexpected()),
        };
    }
    let end = text
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(text.len());
    let word = &text[..end];
    if word.is_empty() || word.contains("-->") || parse_number(word).is_some() {
        return Ok((None, text));
    }
    Ok((Some(word.to_string()), text[end..].trim_start()))
}

fn bracketed(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

fn unquote(text: &str) -> String {
    match quoted.parse(text) {
        Ok(inner) => inner,
        Err(_) => text.to_string(),
    }
}
