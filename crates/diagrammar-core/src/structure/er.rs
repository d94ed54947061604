//! Entity-relationship diagram structure (`erDiagram`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed ER diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErDiagram {
    pub meta: Metadata,
    pub entities: IndexMap<String, Entity>,
    pub relationships: Vec<Relationship>,
}

/// An entity and its attribute block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Display alias from `ENTITY["Alias"]`.
    pub alias: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl Entity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: None,
            attributes: Vec::new(),
        }
    }
}

/// Key constraint on an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    Primary,
    Foreign,
    Unique,
}

impl AttributeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKey::Primary => "PK",
            AttributeKey::Foreign => "FK",
            AttributeKey::Unique => "UK",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "PK" => Some(AttributeKey::Primary),
            "FK" => Some(AttributeKey::Foreign),
            "UK" => Some(AttributeKey::Unique),
            _ => None,
        }
    }
}

/// `type name [PK, FK] ["comment"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub ty: String,
    pub name: String,
    pub keys: Vec<AttributeKey>,
    pub comment: Option<String>,
}

/// How many instances take part at one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Cardinality::ZeroOrOne,
        Cardinality::ExactlyOne,
        Cardinality::ZeroOrMore,
        Cardinality::OneOrMore,
    ];

    /// Two-character token on the left of the line.
    pub fn left_token(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "|o",
            Cardinality::ExactlyOne => "||",
            Cardinality::ZeroOrMore => "}o",
            Cardinality::OneOrMore => "}|",
        }
    }

    /// Two-character token on the right of the line.
    pub fn right_token(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "o|",
            Cardinality::ExactlyOne => "||",
            Cardinality::ZeroOrMore => "o{",
            Cardinality::OneOrMore => "|{",
        }
    }
}

/// `A ||--o{ B : label`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub source_cardinality: Cardinality,
    pub target_cardinality: Cardinality,
    /// `--` is identifying, `..` is not.
    pub identifying: bool,
    pub label: String,
}
