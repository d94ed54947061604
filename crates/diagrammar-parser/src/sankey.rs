//! Sankey diagram parser (`sankey-beta`).
//!
//! Every body line is a `source,target,value` record. Both endpoints are
//! created on first appearance with their id as label.

use diagrammar_core::{DialectTag, structure::sankey::SankeyDiagram};
use log::debug;

use crate::{
    common,
    error::{ErrorCode, ParseError},
    records,
    source::{self, Line},
};

/// Parse sankey text.
pub fn parse(text: &str) -> Result<SankeyDiagram, ParseError> {
    let source = source::prepare(text, DialectTag::Sankey)?;
    let mut diagram = SankeyDiagram {
        meta: source.metadata(),
        ..SankeyDiagram::default()
    };
    for line in &source.body {
        if common::metadata_statement(line, &mut diagram.meta) {
            continue;
        }
        let (source, target, value) = record(line)?;
        diagram.add_flow(&source, &target, value);
    }
    debug!(
        nodes = diagram.nodes.len(),
        links = diagram.links.len();
        "Parsed sankey diagram"
    );
    Ok(diagram)
}

fn record(line: &Line<'_>) -> Result<(String, String, f64), ParseError> {
    let fields = records::split_record(line.text)
        .map_err(|err| line.error(ErrorCode::E201, err.offset(), err.to_string()))?;
    let [source, target, value] = <[String; 3]>::try_from(fields).map_err(|fields| {
        line.error(
            ErrorCode::E100,
            0,
            format!("expected `source,target,value`, found {} fields", fields.len()),
        )
    })?;
    // Point number errors at the value as written on the line.
    let token = line
        .text
        .rfind(value.as_str())
        .map_or(value.as_str(), |at| &line.text[at..at + value.len()]);
    let value = line.non_negative(token)?;
    Ok((source, target, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_create_nodes() {
        let diagram = parse(
            "sankey-beta\nAgricultural waste,Bio-conversion,124.729\nBio-conversion,Liquid,0.597\n\"Gas, natural\",Liquid,10\n",
        )
        .unwrap();
        let ids: Vec<_> = diagram.nodes.keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["Agricultural waste", "Bio-conversion", "Liquid", "Gas, natural"]
        );
        assert_eq!(diagram.nodes["Liquid"].label, "Liquid");
        assert_eq!(diagram.links[0].value, 124.729);
        assert_eq!(diagram.links[2].source, "Gas, natural");
    }

    #[test]
    fn test_quoted_fields_declare_entities() {
        let diagram = parse("sankey-beta\n\"A, Inc\",B,10\nB,\"C, Ltd\",20").unwrap();
        let ids: Vec<_> = diagram.nodes.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["A, Inc", "B", "C, Ltd"]);
        let values: Vec<_> = diagram.links.iter().map(|link| link.value).collect();
        assert_eq!(values, vec![10.0, 20.0]);
        assert_eq!(diagram.links[1].source, "B");
        assert_eq!(diagram.links[1].target, "C, Ltd");

        let diagram = parse("sankey-beta\n\"A \"\"Company\"\"\",B,10\n").unwrap();
        assert_eq!(diagram.nodes["A \"Company\""].label, "A \"Company\"");
        assert_eq!(diagram.links[0].source, "A \"Company\"");
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse("sankey-beta\nA,B\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E100, 2));
    }

    #[test]
    fn test_negative_value_column() {
        let err = parse("sankey-beta\nA,B,-3\n").unwrap_err();
        assert_eq!((err.code, err.line, err.column), (ErrorCode::E202, 2, 5));
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse("sankey-beta\n\"A,B,3\n").unwrap_err();
        assert_eq!((err.code, err.line, err.column), (ErrorCode::E201, 2, 1));
    }

    #[test]
    fn test_invalid_value() {
        let err = parse("sankey-beta\nA,B,lots\n").unwrap_err();
        assert_eq!((err.code, err.column), (ErrorCode::E200, 5));
    }
}
