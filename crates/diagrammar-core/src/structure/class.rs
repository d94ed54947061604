//! Class diagram structure (`classDiagram`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    meta::Metadata,
    structure::{ClassDef, Direction},
};

/// A parsed or built class diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDiagram {
    pub meta: Metadata,
    pub direction: Direction,
    /// Every class, including namespace members, keyed by id.
    pub classes: IndexMap<String, ClassNode>,
    pub relations: Vec<ClassRelation>,
    pub namespaces: Vec<Namespace>,
    pub notes: Vec<ClassNote>,
    pub class_defs: IndexMap<String, ClassDef>,
}

impl ClassDiagram {
    /// Returns `true` if `id` is declared inside a namespace.
    pub fn is_namespace_member(&self, id: &str) -> bool {
        self.namespaces
            .iter()
            .any(|ns| ns.classes.iter().any(|c| c == id))
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: String,
    /// Display label from `class Id["Label"]`.
    pub label: Option<String>,
    /// Generic parameter from `class Id~T~`.
    pub generic: Option<String>,
    /// Stereotypes such as `interface`, without the `<< >>`.
    pub annotations: Vec<String>,
    pub members: Vec<Member>,
    /// Style classes from `:::name` or `cssClass`.
    pub css_classes: Vec<String>,
}

impl ClassNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            generic: None,
            annotations: Vec::new(),
            members: Vec::new(),
            css_classes: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_generic(mut self, generic: impl Into<String>) -> Self {
        self.generic = Some(generic.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.members.push(Member::new(member));
        self
    }
}

/// Whether a member is a field or an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Attribute,
    Method,
}

/// A class member, kept as written (`+int age`, `+isMammal() bool`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub text: String,
    pub kind: MemberKind,
}

impl Member {
    /// Classify `text` as a method when it contains a parameter list.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let kind = if text.contains('(') {
            MemberKind::Method
        } else {
            MemberKind::Attribute
        };
        Self { text, kind }
    }
}

/// Marker at one end of a relation line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationMarker {
    #[default]
    None,
    /// `<|` / `|>`
    Inheritance,
    /// `*`
    Composition,
    /// `o`
    Aggregation,
    /// `<` / `>`
    Association,
}

impl RelationMarker {
    /// Token written on the left of the line.
    pub fn left_token(self) -> &'static str {
        match self {
            RelationMarker::None => "",
            RelationMarker::Inheritance => "<|",
            RelationMarker::Composition => "*",
            RelationMarker::Aggregation => "o",
            RelationMarker::Association => "<",
        }
    }

    /// Token written on the right of the line.
    pub fn right_token(self) -> &'static str {
        match self {
            RelationMarker::None => "",
            RelationMarker::Inheritance => "|>",
            RelationMarker::Composition => "*",
            RelationMarker::Aggregation => "o",
            RelationMarker::Association => ">",
        }
    }
}

/// Line style of a relation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationLine {
    /// `--`
    #[default]
    Solid,
    /// `..`
    Dashed,
}

/// A relation between two classes, `A "1" <|-- "*" B : label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRelation {
    pub source: String,
    pub target: String,
    pub source_marker: RelationMarker,
    pub line: RelationLine,
    pub target_marker: RelationMarker,
    pub source_cardinality: Option<String>,
    pub target_cardinality: Option<String>,
    pub label: Option<String>,
}

impl ClassRelation {
    /// A plain association `source --> target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_marker: RelationMarker::None,
            line: RelationLine::Solid,
            target_marker: RelationMarker::Association,
            source_cardinality: None,
            target_cardinality: None,
            label: None,
        }
    }

    /// `parent <|-- child`
    pub fn inheritance(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, child).with_markers(RelationMarker::Inheritance, RelationMarker::None)
    }

    pub fn with_markers(mut self, source: RelationMarker, target: RelationMarker) -> Self {
        self.source_marker = source;
        self.target_marker = target;
        self
    }

    pub fn with_line(mut self, line: RelationLine) -> Self {
        self.line = line;
        self
    }

    pub fn with_source_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.source_cardinality = Some(cardinality.into());
        self
    }

    pub fn with_target_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.target_cardinality = Some(cardinality.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A `namespace` block listing the classes declared inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub classes: Vec<String>,
}

/// `note "text"` or `note for Id "text"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNote {
    pub target: Option<String>,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_kind_from_text() {
        assert_eq!(Member::new(" +isMammal() ").kind, MemberKind::Method);
        assert_eq!(Member::new("+int age").kind, MemberKind::Attribute);
        assert_eq!(Member::new(" +int age ").text, "+int age");
    }

    #[test]
    fn test_inheritance_markers() {
        let relation = ClassRelation::inheritance("Animal", "Duck");
        assert_eq!(relation.source_marker.left_token(), "<|");
        assert_eq!(relation.target_marker.right_token(), "");
    }
}
