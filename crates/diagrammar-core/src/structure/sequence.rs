//! Sequence diagram structure (`sequenceDiagram`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed or built sequence diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDiagram {
    pub meta: Metadata,
    pub autonumber: bool,
    pub participants: IndexMap<String, Participant>,
    /// Messages, notes, activations and blocks in source order.
    pub statements: Vec<SequenceStatement>,
}

impl SequenceDiagram {
    /// Every message in the diagram, depth first through blocks.
    pub fn messages(&self) -> Vec<&Message> {
        fn walk<'a>(statements: &'a [SequenceStatement], out: &mut Vec<&'a Message>) {
            for statement in statements {
                match statement {
                    SequenceStatement::Message(message) => out.push(message),
                    SequenceStatement::Block(block) => {
                        for section in &block.sections {
                            walk(&section.statements, out);
                        }
                    }
                    SequenceStatement::Note(_)
                    | SequenceStatement::Activate(_)
                    | SequenceStatement::Deactivate(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.statements, &mut out);
        out
    }
}

/// How a participant is drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    #[default]
    Participant,
    Actor,
}

/// A declared participant or actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Alias text from `participant A as Alice`.
    pub label: Option<String>,
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            kind: ParticipantKind::Participant,
        }
    }

    pub fn actor(id: impl Into<String>) -> Self {
        Self {
            kind: ParticipantKind::Actor,
            ..Self::new(id)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Arrow used by a message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageArrow {
    /// `->`
    Solid,
    /// `-->`
    Dotted,
    /// `->>`
    #[default]
    SolidArrow,
    /// `-->>`
    DottedArrow,
    /// `-x`
    SolidCross,
    /// `--x`
    DottedCross,
    /// `-)`
    SolidAsync,
    /// `--)`
    DottedAsync,
}

impl MessageArrow {
    /// Tokens ordered so that no token is tried after one of its prefixes.
    pub const PARSE_ORDER: [MessageArrow; 8] = [
        MessageArrow::DottedArrow,
        MessageArrow::DottedCross,
        MessageArrow::DottedAsync,
        MessageArrow::Dotted,
        MessageArrow::SolidArrow,
        MessageArrow::SolidCross,
        MessageArrow::SolidAsync,
        MessageArrow::Solid,
    ];

    pub fn token(self) -> &'static str {
        match self {
            MessageArrow::Solid => "->",
            MessageArrow::Dotted => "-->",
            MessageArrow::SolidArrow => "->>",
            MessageArrow::DottedArrow => "-->>",
            MessageArrow::SolidCross => "-x",
            MessageArrow::DottedCross => "--x",
            MessageArrow::SolidAsync => "-)",
            MessageArrow::DottedAsync => "--)",
        }
    }
}

/// Activation shorthand attached to a message (`->>+` / `->>-`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    #[default]
    None,
    Activate,
    Deactivate,
}

/// A message between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source: String,
    pub target: String,
    pub arrow: MessageArrow,
    pub activation: Activation,
    pub text: String,
}

impl Message {
    pub fn new(source: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            arrow: MessageArrow::SolidArrow,
            activation: Activation::None,
            text: text.into(),
        }
    }

    pub fn with_arrow(mut self, arrow: MessageArrow) -> Self {
        self.arrow = arrow;
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }
}

/// Placement of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotePlacement {
    LeftOf,
    RightOf,
    Over,
}

impl NotePlacement {
    pub fn as_str(self) -> &'static str {
        match self {
            NotePlacement::LeftOf => "left of",
            NotePlacement::RightOf => "right of",
            NotePlacement::Over => "over",
        }
    }
}

/// `Note right of A: text`, `Note over A,B: text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceNote {
    pub placement: NotePlacement,
    pub participants: Vec<String>,
    pub text: String,
}

/// Kind of a control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Loop,
    Alt,
    Opt,
    Par,
    Critical,
    Break,
    Rect,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Loop,
        BlockKind::Alt,
        BlockKind::Opt,
        BlockKind::Par,
        BlockKind::Critical,
        BlockKind::Break,
        BlockKind::Rect,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Loop => "loop",
            BlockKind::Alt => "alt",
            BlockKind::Opt => "opt",
            BlockKind::Par => "par",
            BlockKind::Critical => "critical",
            BlockKind::Break => "break",
            BlockKind::Rect => "rect",
        }
    }

    /// Keyword that opens a further section, if the block kind has one.
    pub fn section_keyword(self) -> Option<&'static str> {
        match self {
            BlockKind::Alt => Some("else"),
            BlockKind::Par => Some("and"),
            BlockKind::Critical => Some("option"),
            BlockKind::Loop | BlockKind::Opt | BlockKind::Break | BlockKind::Rect => None,
        }
    }
}

/// One section of a block; the first holds the block's own label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSection {
    pub label: String,
    pub statements: Vec<SequenceStatement>,
}

/// `loop`, `alt`/`else`, `par`/`and`, ... terminated by `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Never empty.
    pub sections: Vec<BlockSection>,
}

/// A statement of the diagram body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceStatement {
    Message(Message),
    Note(SequenceNote),
    Activate(String),
    Deactivate(String),
    Block(Block),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_puts_longer_tokens_first() {
        let order = MessageArrow::PARSE_ORDER;
        for (i, earlier) in order.iter().enumerate() {
            for later in &order[i + 1..] {
                assert!(
                    !later.token().starts_with(earlier.token()),
                    "{} would shadow {}",
                    earlier.token(),
                    later.token()
                );
            }
        }
    }

    #[test]
    fn test_messages_walks_blocks() {
        let diagram = SequenceDiagram {
            statements: vec![
                SequenceStatement::Message(Message::new("A", "B", "one")),
                SequenceStatement::Block(Block {
                    kind: BlockKind::Loop,
                    sections: vec![BlockSection {
                        label: "forever".to_string(),
                        statements: vec![SequenceStatement::Message(Message::new("B", "A", "two"))],
                    }],
                }),
            ],
            ..SequenceDiagram::default()
        };
        let texts: Vec<_> = diagram.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
