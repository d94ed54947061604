//! Pie chart parser (`pie`).
//!
//! The pie grammar runs on the asynchronous grammar engine, so the dialect's
//! primary entry point is [`parse_async`]. [`parse`] works once the engine has
//! been initialised (by [`parse_async`] or [`crate::init_engines`]).

use diagrammar_core::structure::pie::PieChart;
use log::{debug, trace};

use crate::{
    common,
    engine::{self, PieGrammar},
    error::{ErrorCode, ParseError},
    source::{self, Line, Source},
};

/// Parse pie text, initialising the grammar engine first if needed.
pub async fn parse_async(text: &str) -> Result<PieChart, ParseError> {
    let grammar = engine::pie().await;
    parse_with(grammar, text)
}

/// Parse pie text with an already initialised grammar engine.
///
/// Fails with [`ErrorCode::E900`] if the engine has not been initialised.
pub fn parse(text: &str) -> Result<PieChart, ParseError> {
    let grammar = engine::pie_ready().ok_or_else(|| {
        ParseError::new(
            ErrorCode::E900,
            1,
            1,
            "pie grammar engine not initialised; call `init_engines` first",
        )
    })?;
    parse_with(grammar, text)
}

fn parse_with(grammar: &PieGrammar, text: &str) -> Result<PieChart, ParseError> {
    let source = source::prepare(text, diagrammar_core::DialectTag::Pie)?;
    let mut acc = Accumulator::new(grammar, &source);
    if let Some(header) = &source.header {
        acc.header(header)?;
    }
    for line in &source.body {
        acc.statement(line)?;
    }
    debug!(sections = acc.chart.sections.len(); "Parsed pie chart");
    Ok(acc.chart)
}

/// Per-call parse state.
struct Accumulator<'g> {
    grammar: &'g PieGrammar,
    chart: PieChart,
}

impl<'g> Accumulator<'g> {
    fn new(grammar: &'g PieGrammar, source: &Source<'_>) -> Self {
        Self {
            grammar,
            chart: PieChart {
                meta: source.metadata(),
                ..PieChart::default()
            },
        }
    }

    fn header(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        let caps = self
            .grammar
            .header
            .captures(line.text)
            .ok_or_else(|| line.unexpected())?;
        self.chart.show_data |= caps.get(1).is_some();
        if let Some(title) = caps.get(2).map(|m| m.as_str().trim()).filter(|t| !t.is_empty()) {
            self.chart.meta.title = Some(title.to_string());
        }
        Ok(())
    }

    fn statement(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        if common::metadata_statement(line, &mut self.chart.meta) {
            return Ok(());
        }
        if self.grammar.show_data.is_match(line.text) {
            self.chart.show_data = true;
            return Ok(());
        }
        if let Some(caps) = self.grammar.title.captures(line.text) {
            let title = caps.get(1).map_or("", |m| m.as_str().trim());
            self.chart.meta.title = (!title.is_empty()).then(|| title.to_string());
            return Ok(());
        }
        if let Some(caps) = self.grammar.section.captures(line.text) {
            let (Some(label), Some(value)) = (caps.get(1), caps.get(2)) else {
                return Err(line.unexpected());
            };
            let label = diagrammar_core::text::decode_entities(label.as_str());
            let value = line.non_negative(value.as_str())?;
            trace!(label = label.as_str(), value; "Pie section");
            self.chart.sections.entry(label).or_insert(value);
            return Ok(());
        }
        Err(line.unexpected())
    }
}
