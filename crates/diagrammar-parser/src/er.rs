//! Entity-relationship diagram parser (`erDiagram`).
//!
//! Entity statements and attribute blocks declare entities; relationship
//! endpoints are kept as written.

use diagrammar_core::{
    DialectTag,
    structure::er::{Attribute, AttributeKey, Cardinality, Entity, ErDiagram, Relationship},
};
use log::debug;
use winnow::{
    Parser,
    combinator::{alt, delimited, opt, preceded, separated, terminated},
    token::take_till,
};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{IResult, backtrack, name, quoted, rest_trimmed, run, ws, ws1},
    source::{self, Line},
};

/// Parse ER diagram text.
pub fn parse(text: &str) -> Result<ErDiagram, ParseError> {
    let source = source::prepare(text, DialectTag::Er)?;
    let mut diagram = ErDiagram {
        meta: source.metadata(),
        ..ErDiagram::default()
    };
    let mut open: Option<(String, Line<'_>)> = None;

    for line in &source.body {
        if let Some((id, _)) = &open {
            if line.text == "}" {
                open = None;
            } else {
                let attribute = run(line, attribute)?;
                if let Some(entity) = diagram.entities.get_mut(id) {
                    entity.attributes.push(attribute);
                }
            }
            continue;
        }

        if line.text == "}" {
            return Err(line.error(ErrorCode::E102, 0, "`}` without an open entity"));
        }
        if common::metadata_statement(line, &mut diagram.meta) {
            continue;
        }
        if let Ok(relationship) = relationship.parse(line.text) {
            diagram.relationships.push(relationship);
            continue;
        }
        if let Ok((id, alias, opens_block)) = entity_statement.parse(line.text) {
            let entity = diagram
                .entities
                .entry(id.to_string())
                .or_insert_with(|| Entity::new(id));
            if alias.is_some() {
                entity.alias = alias;
            }
            if opens_block {
                open = Some((id.to_string(), *line));
            }
            continue;
        }
        return Err(line.unexpected());
    }

    if let Some((id, line)) = open {
        return Err(line.error(
            ErrorCode::E101,
            0,
            format!("attribute block of `{id}` is never closed"),
        ));
    }
    debug!(
        entities = diagram.entities.len(),
        relationships = diagram.relationships.len();
        "Parsed ER diagram"
    );
    Ok(diagram)
}

/// `CUSTOMER`, `CUSTOMER["Client"]`, `CUSTOMER {`
fn entity_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, Option<String>, bool)> {
    let id = name.parse_next(input)?;
    let alias = opt(delimited(('[', ws), quoted, (ws, ']'))).parse_next(input)?;
    ws.parse_next(input)?;
    let brace = opt(('{', ws, opt('}'))).parse_next(input)?;
    Ok((id, alias, matches!(brace, Some((_, _, None)))))
}

/// `string name PK, FK "comment"`
fn attribute(input: &mut &str) -> IResult<Attribute> {
    let ty = take_till(1.., [' ', '\t']).parse_next(input)?;
    ws1.parse_next(input)?;
    let name = take_till(1.., [' ', '\t']).parse_next(input)?;
    let keys: Option<Vec<AttributeKey>> =
        opt(preceded(ws1, separated(1.., attribute_key, (ws, ',', ws)))).parse_next(input)?;
    let comment = opt(preceded(ws, quoted)).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(Attribute {
        ty: ty.to_string(),
        name: name.to_string(),
        keys: keys.unwrap_or_default(),
        comment,
    })
}

fn attribute_key(input: &mut &str) -> IResult<AttributeKey> {
    let token = name.parse_next(input)?;
    match AttributeKey::from_token(token) {
        Some(key) => Ok(key),
        None => backtrack(),
    }
}

/// `CUSTOMER ||--o{ ORDER : places`
fn relationship(input: &mut &str) -> IResult<Relationship> {
    let source = terminated(name, ws).parse_next(input)?;
    let source_cardinality = cardinality(Cardinality::left_token).parse_next(input)?;
    let identifying = alt(("--".value(true), "..".value(false))).parse_next(input)?;
    let target_cardinality = cardinality(Cardinality::right_token).parse_next(input)?;
    ws.parse_next(input)?;
    let target = terminated(name, ws).parse_next(input)?;
    let label = opt(preceded(
        (':', ws),
        alt((terminated(quoted, ws), rest_trimmed.map(str::to_string))),
    ))
    .parse_next(input)?;

    Ok(Relationship {
        source: source.to_string(),
        target: target.to_string(),
        source_cardinality,
        target_cardinality,
        identifying,
        label: label.unwrap_or_default(),
    })
}

fn cardinality<'s>(
    token: fn(Cardinality) -> &'static str,
) -> impl FnMut(&mut &'s str) -> IResult<Cardinality> {
    move |input: &mut &'s str| {
        for cardinality in Cardinality::ALL {
            if let Some(rest) = input.strip_prefix(token(cardinality)) {
                *input = rest;
                return Ok(cardinality);
            }
        }
        backtrack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationships() {
        let diagram = parse(
            "erDiagram\n    CUSTOMER ||--o{ ORDER : places\n    ORDER ||--|{ LINE-ITEM : \"contains many\"\n    PERSON }o..|| CAR : drives\n",
        )
        .unwrap();
        let r = &diagram.relationships;
        assert_eq!(r[0].source_cardinality, Cardinality::ExactlyOne);
        assert_eq!(r[0].target_cardinality, Cardinality::ZeroOrMore);
        assert!(r[0].identifying);
        assert_eq!(r[1].target, "LINE-ITEM");
        assert_eq!(r[1].target_cardinality, Cardinality::OneOrMore);
        assert_eq!(r[1].label, "contains many");
        assert_eq!(r[2].source_cardinality, Cardinality::ZeroOrMore);
        assert!(!r[2].identifying);
        assert!(diagram.entities.is_empty());
    }

    #[test]
    fn test_entities_and_attributes() {
        let diagram = parse(
            "erDiagram\nCUSTOMER[\"Client\"] {\n    string name PK\n    int id PK, FK \"surrogate\"\n    varchar(32) email UK\n    date joined\n}\nORDER\n",
        )
        .unwrap();
        let customer = &diagram.entities["CUSTOMER"];
        assert_eq!(customer.alias.as_deref(), Some("Client"));
        assert_eq!(customer.attributes.len(), 4);
        assert_eq!(customer.attributes[0].keys, vec![AttributeKey::Primary]);
        assert_eq!(
            customer.attributes[1].keys,
            vec![AttributeKey::Primary, AttributeKey::Foreign]
        );
        assert_eq!(customer.attributes[1].comment.as_deref(), Some("surrogate"));
        assert_eq!(customer.attributes[2].ty, "varchar(32)");
        assert!(customer.attributes[3].keys.is_empty());
        assert!(diagram.entities.contains_key("ORDER"));
    }

    #[test]
    fn test_unbalanced_blocks() {
        let err = parse("erDiagram\nA {\nstring x\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E101, 2));
        let err = parse("erDiagram\n}\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::E102);
    }

    #[test]
    fn test_bad_attribute_is_reported_on_its_line() {
        let err = parse("erDiagram\nA {\n    string\n}\n").unwrap_err();
        assert_eq!((err.code, err.line, err.column), (ErrorCode::E100, 3, 5));
    }
}
