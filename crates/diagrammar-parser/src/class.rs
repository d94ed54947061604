//! Class diagram parser (`classDiagram`).
//!
//! `class`, member, annotation and `cssClass` statements declare the class
//! they name. Relation and note endpoints are kept as written.

use diagrammar_core::{
    DialectTag,
    structure::class::{
        ClassDiagram, ClassNode, ClassNote, ClassRelation, Member, Namespace, RelationLine,
        RelationMarker,
    },
    text::is_ident_char,
};
use log::debug;
use winnow::{
    Parser,
    combinator::{delimited, opt, preceded, repeat, terminated},
    token::take_till,
};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{IResult, backtrack, ident, keyword, name, quoted, rest_trimmed, ws, ws1},
    source::{self, Line},
};

/// Parse class diagram text.
pub fn parse(text: &str) -> Result<ClassDiagram, ParseError> {
    let source = source::prepare(text, DialectTag::Class)?;
    let mut acc = Accumulator {
        diagram: ClassDiagram {
            meta: source.metadata(),
            ..ClassDiagram::default()
        },
        scopes: Vec::new(),
    };
    for line in &source.body {
        acc.statement(line)?;
    }
    acc.finish()
}

/// An open `{` block.
enum Scope<'s> {
    Namespace(Namespace, Line<'s>),
    ClassBody(String, Line<'s>),
}

/// Per-call parse state.
struct Accumulator<'s> {
    diagram: ClassDiagram,
    scopes: Vec<Scope<'s>>,
}

impl<'s> Accumulator<'s> {
    fn statement(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        if let Some(Scope::ClassBody(id, _)) = self.scopes.last() {
            let id = id.clone();
            return self.body_statement(&id, line);
        }

        if line.text == "}" {
            return self.close(line);
        }
        if common::metadata_statement(line, &mut self.diagram.meta) {
            return Ok(());
        }
        if let Some(direction) = common::direction_statement(line) {
            self.diagram.direction = direction;
            return Ok(());
        }
        if let Ok(name) = namespace_open.parse(line.text) {
            let namespace = Namespace {
                name: name.to_string(),
                classes: Vec::new(),
            };
            self.scopes.push(Scope::Namespace(namespace, *line));
            return Ok(());
        }
        if let Some(defs) = common::class_def_statement(line) {
            for def in defs {
                self.diagram.class_defs.insert(def.name().to_string(), def);
            }
            return Ok(());
        }
        if let Ok((targets, class)) = css_class_statement.parse(line.text) {
            for target in targets.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let node = self.declare(target);
                if !node.css_classes.iter().any(|c| c == class) {
                    node.css_classes.push(class.to_string());
                }
            }
            return Ok(());
        }
        if let Ok(decl) = class_declaration.parse(line.text) {
            let opens_body = decl.opens_body;
            let id = decl.id.to_string();
            let node = self.declare(decl.id);
            if let Some(generic) = decl.generic {
                node.generic = Some(generic.to_string());
            }
            if let Some(label) = decl.label {
                node.label = Some(label);
            }
            for class in decl.css_classes {
                if !node.css_classes.iter().any(|c| c == class) {
                    node.css_classes.push(class.to_string());
                }
            }
            if opens_body {
                self.scopes.push(Scope::ClassBody(id, *line));
            }
            return Ok(());
        }
        if let Ok((annotation, id)) = annotation_statement.parse(line.text) {
            self.declare(id).annotations.push(annotation.trim().to_string());
            return Ok(());
        }
        if let Ok(note) = note_statement.parse(line.text) {
            self.diagram.notes.push(note);
            return Ok(());
        }
        if let Ok(relation) = relation.parse(line.text) {
            self.diagram.relations.push(relation);
            return Ok(());
        }
        if let Ok((id, member)) = member_statement.parse(line.text) {
            self.declare(id).members.push(Member::new(member));
            return Ok(());
        }
        Err(line.unexpected())
    }

    /// A line inside `class Id { ... }`.
    fn body_statement(&mut self, id: &str, line: &Line<'s>) -> Result<(), ParseError> {
        if line.text == "}" {
            return self.close(line);
        }
        let node = self.declare(id);
        match annotation.parse(line.text) {
            Ok(annotation) => node.annotations.push(annotation.trim().to_string()),
            Err(_) => node.members.push(Member::new(line.text)),
        }
        Ok(())
    }

    /// Find or create the class `id`, recording namespace membership.
    fn declare(&mut self, id: &str) -> &mut ClassNode {
        let in_namespace = self.scopes.iter_mut().rev().find_map(|scope| match scope {
            Scope::Namespace(namespace, _) => Some(namespace),
            Scope::ClassBody(..) => None,
        });
        if let Some(namespace) = in_namespace {
            if !namespace.classes.iter().any(|c| c == id) {
                namespace.classes.push(id.to_string());
            }
        }
        self.diagram
            .classes
            .entry(id.to_string())
            .or_insert_with(|| ClassNode::new(id))
    }

    fn close(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        match self.scopes.pop() {
            Some(Scope::Namespace(namespace, _)) => {
                self.diagram.namespaces.push(namespace);
                Ok(())
            }
            Some(Scope::ClassBody(..)) => Ok(()),
            None => Err(line.error(ErrorCode::E102, 0, "`}` without an open block")),
        }
    }

    fn finish(self) -> Result<ClassDiagram, ParseError> {
        if let Some(scope) = self.scopes.first() {
            let (what, line) = match scope {
                Scope::Namespace(ns, line) => (format!("namespace `{}`", ns.name), line),
                Scope::ClassBody(id, line) => (format!("class `{id}`"), line),
            };
            return Err(line.error(ErrorCode::E101, 0, format!("{what} is never closed")));
        }
        debug!(
            classes = self.diagram.classes.len(),
            relations = self.diagram.relations.len();
            "Parsed class diagram"
        );
        Ok(self.diagram)
    }
}

/// `class Id~T~["Label"]:::css {`
struct ClassDeclaration<'s> {
    id: &'s str,
    generic: Option<&'s str>,
    label: Option<String>,
    css_classes: Vec<&'s str>,
    opens_body: bool,
}

fn class_declaration<'s>(input: &mut &'s str) -> IResult<ClassDeclaration<'s>> {
    (keyword("class"), ws1).parse_next(input)?;
    let id = ident.parse_next(input)?;
    let generic = opt(delimited('~', take_till(1.., '~'), '~')).parse_next(input)?;
    let label = opt(delimited(('[', ws), quoted, (ws, ']'))).parse_next(input)?;
    let css_classes = repeat(0.., preceded(":::", name)).parse_next(input)?;
    ws.parse_next(input)?;
    let brace = opt(('{', ws, opt('}'))).parse_next(input)?;
    let opens_body = matches!(brace, Some((_, _, None)));
    Ok(ClassDeclaration {
        id,
        generic,
        label,
        css_classes,
        opens_body,
    })
}

fn namespace_open<'s>(input: &mut &'s str) -> IResult<&'s str> {
    delimited((keyword("namespace"), ws1), name, (ws, '{')).parse_next(input)
}

/// `<<interface>>`
fn annotation<'s>(input: &mut &'s str) -> IResult<&'s str> {
    delimited("<<", take_till(1.., '>'), ">>").parse_next(input)
}

/// `<<interface>> Id`
fn annotation_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (terminated(annotation, ws1), ident).parse_next(input)
}

/// `cssClass "A,B" name`
fn css_class_statement<'s>(input: &mut &'s str) -> IResult<(String, &'s str)> {
    preceded((keyword("cssClass"), ws1), (terminated(quoted, ws1), name)).parse_next(input)
}

/// `note "text"` or `note for Id "text"`
fn note_statement(input: &mut &str) -> IResult<ClassNote> {
    (keyword("note"), ws1).parse_next(input)?;
    let target = opt(delimited((keyword("for"), ws1), ident, ws1)).parse_next(input)?;
    let text = quoted.parse_next(input)?;
    Ok(ClassNote {
        target: target.map(str::to_string),
        text,
    })
}

/// `Id : member`
fn member_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (
        terminated(ident, (ws, ':', ws)),
        rest_trimmed.verify(|m: &str| !m.is_empty()),
    )
        .parse_next(input)
}

/// `A "1" <|-- "*" B : label`
fn relation(input: &mut &str) -> IResult<ClassRelation> {
    let source = terminated(ident, ws).parse_next(input)?;
    let source_cardinality = opt(terminated(quoted, ws)).parse_next(input)?;
    let (source_marker, line, target_marker) = relation_operator.parse_next(input)?;
    ws.parse_next(input)?;
    let target_cardinality = opt(terminated(quoted, ws)).parse_next(input)?;
    let target = ident.parse_next(input)?;
    let label = opt(preceded((ws, ':'), rest_trimmed)).parse_next(input)?;

    Ok(ClassRelation {
        source: source.to_string(),
        target: target.to_string(),
        source_marker,
        line,
        target_marker,
        source_cardinality,
        target_cardinality,
        label: label.filter(|l| !l.is_empty()).map(str::to_string),
    })
}

const MARKERS: [RelationMarker; 4] = [
    RelationMarker::Inheritance,
    RelationMarker::Composition,
    RelationMarker::Aggregation,
    RelationMarker::Association,
];

fn relation_operator<'s>(
    input: &mut &'s str,
) -> IResult<(RelationMarker, RelationLine, RelationMarker)> {
    let mut text: &'s str = *input;

    let left = MARKERS
        .into_iter()
        .find(|m| text.starts_with(m.left_token()))
        .unwrap_or(RelationMarker::None);
    text = &text[left.left_token().len()..];

    let line = if let Some(rest) = text.strip_prefix("--") {
        text = rest;
        RelationLine::Solid
    } else if let Some(rest) = text.strip_prefix("..") {
        text = rest;
        RelationLine::Dashed
    } else {
        return backtrack();
    };

    let right = MARKERS
        .into_iter()
        .find(|m| {
            text.strip_prefix(m.right_token())
                .is_some_and(|rest| !rest.starts_with(is_ident_char) || m.right_token() != "o")
        })
        .unwrap_or(RelationMarker::None);
    text = &text[right.right_token().len()..];

    *input = text;
    Ok((left, line, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_declarations_and_bodies() {
        let diagram = parse(
            "classDiagram\n    class Animal~T~[\"An animal\"]:::base {\n        <<interface>>\n        +int age\n        +isMammal() bool\n    }\n    class Duck\n    Duck : +swim()\n",
        )
        .unwrap();
        let animal = &diagram.classes["Animal"];
        assert_eq!(animal.generic.as_deref(), Some("T"));
        assert_eq!(animal.label.as_deref(), Some("An animal"));
        assert_eq!(animal.annotations, vec!["interface"]);
        assert_eq!(animal.members.len(), 2);
        assert_eq!(animal.css_classes, vec!["base"]);
        assert_eq!(diagram.classes["Duck"].members[0].text, "+swim()");
    }

    #[test]
    fn test_relations() {
        let diagram = parse(
            "classDiagram\nAnimal <|-- Duck\nA \"1\" *-- \"many\" B : has\nC ..> D\nE o-- F\nG -- H\nI <|--|> J\n",
        )
        .unwrap();
        let r = &diagram.relations;
        assert_eq!(r[0].source_marker, RelationMarker::Inheritance);
        assert_eq!(r[0].target_marker, RelationMarker::None);
        assert_eq!(r[1].source_cardinality.as_deref(), Some("1"));
        assert_eq!(r[1].target_cardinality.as_deref(), Some("many"));
        assert_eq!(r[1].label.as_deref(), Some("has"));
        assert_eq!(r[2].line, RelationLine::Dashed);
        assert_eq!(r[2].target_marker, RelationMarker::Association);
        assert_eq!(r[3].source_marker, RelationMarker::Aggregation);
        assert_eq!(r[4].source_marker, RelationMarker::None);
        assert_eq!(r[5].target_marker, RelationMarker::Inheritance);
        assert!(diagram.classes.is_empty());
    }

    #[test]
    fn test_namespaces_and_notes() {
        let diagram = parse(
            "classDiagram\nnamespace Shapes {\n    class Triangle\n    class Square {\n        +side\n    }\n}\nnote \"general\"\nnote for Square \"four sides\"\n",
        )
        .unwrap();
        assert_eq!(diagram.namespaces[0].name, "Shapes");
        assert_eq!(diagram.namespaces[0].classes, vec!["Triangle", "Square"]);
        assert_eq!(diagram.notes[1].target.as_deref(), Some("Square"));
        assert!(diagram.is_namespace_member("Square"));
    }

    #[test]
    fn test_css_class_and_annotation_statements() {
        let diagram =
            parse("classDiagram\n<<service>> Api\ncssClass \"Api,Db\" hot\nclassDef hot fill:#f00\n")
                .unwrap();
        assert_eq!(diagram.classes["Api"].annotations, vec!["service"]);
        assert_eq!(diagram.classes["Db"].css_classes, vec!["hot"]);
        assert!(diagram.class_defs.contains_key("hot"));
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = parse("classDiagram\nclass A {\n+x\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E101, 2));
        let err = parse("classDiagram\n}\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::E102);
    }
}
