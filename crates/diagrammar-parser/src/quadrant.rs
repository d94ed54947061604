//! Quadrant chart parser (`quadrantChart`).

use diagrammar_core::{
    DialectTag,
    structure::quadrant::{AxisLabels, QuadrantChart, QuadrantPoint},
};
use log::debug;
use winnow::{
    Parser,
    combinator::{alt, delimited, opt, preceded, terminated},
    token::{one_of, take_till},
};

use crate::{
    common,
    error::ParseError,
    lexeme::{IResult, name, quoted, rest_trimmed, ws, ws1},
    source::{self, Line},
};

/// Parse quadrant chart text.
pub fn parse(text: &str) -> Result<QuadrantChart, ParseError> {
    let source = source::prepare(text, DialectTag::Quadrant)?;
    let mut chart = QuadrantChart {
        meta: source.metadata(),
        ..QuadrantChart::default()
    };
    for line in &source.body {
        statement(&mut chart, line)?;
    }
    debug!(points = chart.points.len(); "Parsed quadrant chart");
    Ok(chart)
}

fn statement(chart: &mut QuadrantChart, line: &Line<'_>) -> Result<(), ParseError> {
    if common::metadata_statement(line, &mut chart.meta) {
        return Ok(());
    }
    if let Some(title) = common::title_statement(line) {
        chart.meta.title = Some(title.to_string());
        return Ok(());
    }
    if let Ok((axis, labels)) = axis_statement.parse(line.text) {
        match axis {
            'x' => chart.x_axis = labels,
            _ => chart.y_axis = labels,
        }
        return Ok(());
    }
    if let Ok((index, text)) = quadrant_statement.parse(line.text) {
        chart.quadrants[index] = Some(text.to_string());
        return Ok(());
    }
    if let Ok((name, class, x, y)) = point_statement.parse(line.text) {
        chart.points.push(QuadrantPoint {
            name,
            class: class.map(str::to_string),
            x: line.number(x)?,
            y: line.number(y)?,
        });
        return Ok(());
    }
    Err(line.unexpected())
}

/// `x-axis Low --> High`, `y-axis "Bottom"`
fn axis_statement(input: &mut &str) -> IResult<(char, AxisLabels)> {
    let axis = terminated(one_of(['x', 'y']), ("-axis", ws1)).parse_next(input)?;
    let text = rest_trimmed.parse_next(input)?;
    let (start, end) = match text.split_once("-->") {
        Some((start, end)) => (start, Some(end)),
        None => (text, None),
    };
    let label = |text: &str| {
        let text = text.trim();
        (!text.is_empty()).then(|| unquote(text))
    };
    Ok((
        axis,
        AxisLabels {
            start: label(start),
            end: end.and_then(label),
        },
    ))
}

/// `quadrant-3 Re-evaluate`, returning the zero-based index.
fn quadrant_statement<'s>(input: &mut &'s str) -> IResult<(usize, &'s str)> {
    let digit = delimited("quadrant-", one_of('1'..='4'), ws1).parse_next(input)?;
    let text = rest_trimmed.verify(|t: &str| !t.is_empty()).parse_next(input)?;
    let index = match digit {
        '1' => 0,
        '2' => 1,
        '3' => 2,
        _ => 3,
    };
    Ok((index, text))
}

/// `Campaign A:::hot: [0.3, 0.6]`
#[allow(clippy::type_complexity)]
fn point_statement<'s>(
    input: &mut &'s str,
) -> IResult<(String, Option<&'s str>, &'s str, &'s str)> {
    let label = alt((
        terminated(quoted, ws),
        take_till(1.., ':').map(|n: &str| n.trim().to_string()),
    ))
    .verify(|n: &String| !n.is_empty())
    .parse_next(input)?;
    let class = opt(preceded(":::", name)).parse_next(input)?;
    (ws, ':', ws, '[').parse_next(input)?;
    let x = take_till(1.., [',', ']']).parse_next(input)?;
    ','.parse_next(input)?;
    let y = take_till(1.., [',', ']']).parse_next(input)?;
    (']', ws).parse_next(input)?;
    Ok((label, class, x.trim(), y.trim()))
}

fn unquote(text: &str) -> String {
    match quoted.parse(text) {
        Ok(inner) => inner,
        Err(_) => text.to_string(),
    }
}
