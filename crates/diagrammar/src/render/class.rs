//! Canonical class diagram text.

use diagrammar_core::structure::class::{
    ClassDiagram, ClassNode, ClassRelation, Namespace, RelationLine,
};
use indexmap::IndexSet;

use super::{declaration_order, quoted, style_list, writer::Writer};
use crate::config::RenderOptions;

/// Render a class diagram.
pub fn class(diagram: &ClassDiagram, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&diagram.meta);
    w.header("classDiagram");
    w.accessibility(&diagram.meta);
    if diagram.direction != Default::default() {
        w.line(format!("direction {}", diagram.direction));
    }

    let mut declared = IndexSet::new();
    let top: Vec<&ClassNode> = diagram
        .classes
        .values()
        .filter(|node| !diagram.is_namespace_member(&node.id))
        .collect();
    for node in declaration_order(top, options, |n: &ClassNode| n.id.as_str()) {
        declared.insert(node.id.as_str());
        write_class(&mut w, node);
    }
    for namespace in &diagram.namespaces {
        write_namespace(&mut w, diagram, namespace, &mut declared);
    }

    for relation in &diagram.relations {
        w.line(relation_text(relation));
    }
    for note in &diagram.notes {
        match &note.target {
            Some(target) => w.line(format!("note for {target} {}", quoted(&note.text))),
            None => w.line(format!("note {}", quoted(&note.text))),
        }
    }
    for def in diagram.class_defs.values() {
        w.line(format!("classDef {} {}", def.name(), style_list(def.styles())));
    }
    for node in declared.iter().filter_map(|id| diagram.classes.get(*id)) {
        for css in &node.css_classes {
            w.line(format!("cssClass {} {css}", quoted(&node.id)));
        }
    }
    w.finish()
}

fn write_namespace<'a>(
    w: &mut Writer<'_>,
    diagram: &'a ClassDiagram,
    namespace: &'a Namespace,
    declared: &mut IndexSet<&'a str>,
) {
    w.line(format!("namespace {} {{", namespace.name));
    w.nested(|w| {
        let members: Vec<&str> = namespace.classes.iter().map(String::as_str).collect();
        for id in declaration_order(members, w.options(), |id: &str| id) {
            let first = declared.insert(id);
            match diagram.classes.get(id) {
                Some(node) if first => write_class(w, node),
                _ => w.line(format!("class {id}")),
            }
        }
    });
    w.line("}");
}

/// `class Id~T~["Label"]`, with a `{ ... }` body for annotations and members.
fn write_class(w: &mut Writer<'_>, node: &ClassNode) {
    let mut head = format!("class {}", node.id);
    if let Some(generic) = &node.generic {
        head.push('~');
        head.push_str(generic);
        head.push('~');
    }
    if let Some(label) = &node.label {
        head.push('[');
        head.push_str(&quoted(label));
        head.push(']');
    }
    if node.annotations.is_empty() && node.members.is_empty() {
        w.line(head);
        return;
    }

    w.line(format!("{head} {{"));
    w.nested(|w| {
        for annotation in &node.annotations {
            w.line(format!("<<{annotation}>>"));
        }
        for member in &node.members {
            w.line(&member.text);
        }
    });
    w.line("}");
}

/// `A "1" <|-- "*" B : label`
fn relation_text(relation: &ClassRelation) -> String {
    let mut text = relation.source.clone();
    if let Some(cardinality) = &relation.source_cardinality {
        text.push(' ');
        text.push_str(&quoted(cardinality));
    }
    text.push(' ');
    text.push_str(relation.source_marker.left_token());
    text.push_str(match relation.line {
        RelationLine::Solid => "--",
        RelationLine::Dashed => "..",
    });
    text.push_str(relation.target_marker.right_token());
    if let Some(cardinality) = &relation.target_cardinality {
        text.push(' ');
        text.push_str(&quoted(cardinality));
    }
    text.push(' ');
    text.push_str(&relation.target);
    if let Some(label) = relation.label.as_deref().filter(|l| !l.trim().is_empty()) {
        text.push_str(" : ");
        text.push_str(label);
    }
    text
}
