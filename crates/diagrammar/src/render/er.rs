//! Canonical entity-relationship diagram text.

use diagrammar_core::{
    structure::er::{Attribute, Entity, ErDiagram, Relationship},
    text::is_ident_char,
};

use super::{declaration_order, quoted, writer::Writer};
use crate::config::RenderOptions;

/// Render an ER diagram: entities with their attribute blocks, then relationships.
pub fn er(diagram: &ErDiagram, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&diagram.meta);
    w.header("erDiagram");
    w.accessibility(&diagram.meta);

    let entities: Vec<&Entity> = diagram.entities.values().collect();
    for entity in declaration_order(entities, options, |e: &Entity| e.id.as_str()) {
        write_entity(&mut w, entity);
    }
    for relationship in &diagram.relationships {
        w.line(relationship_text(relationship));
    }
    w.finish()
}

fn write_entity(w: &mut Writer<'_>, entity: &Entity) {
    let mut head = entity.id.clone();
    if let Some(alias) = &entity.alias {
        head.push('[');
        head.push_str(&quoted(alias));
        head.push(']');
    }
    if entity.attributes.is_empty() {
        w.line(head);
        return;
    }
    w.line(format!("{head} {{"));
    w.nested(|w| {
        for attribute in &entity.attributes {
            w.line(attribute_text(attribute));
        }
    });
    w.line("}");
}

/// `int id PK, FK "surrogate"`
fn attribute_text(attribute: &Attribute) -> String {
    let mut text = format!("{} {}", attribute.ty, attribute.name);
    if !attribute.keys.is_empty() {
        let keys: Vec<&str> = attribute.keys.iter().map(|k| k.as_str()).collect();
        text.push(' ');
        text.push_str(&keys.join(", "));
    }
    if let Some(comment) = &attribute.comment {
        text.push(' ');
        text.push_str(&quoted(comment));
    }
    text
}

/// `CUSTOMER ||--o{ ORDER : places`
fn relationship_text(relationship: &Relationship) -> String {
    let mut text = format!(
        "{} {}{}{} {}",
        relationship.source,
        relationship.source_cardinality.left_token(),
        if relationship.identifying { "--" } else { ".." },
        relationship.target_cardinality.right_token(),
        relationship.target
    );
    let label = relationship.label.as_str();
    if label.is_empty() {
        return text;
    }
    text.push_str(" : ");
    if label.chars().all(|c| is_ident_char(c) || c == '-') {
        text.push_str(label);
    } else {
        text.push_str(&quoted(label));
    }
    text
}
