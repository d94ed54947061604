//! State diagram structure (`stateDiagram-v2`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    meta::Metadata,
    structure::{ClassDef, Direction},
};

/// Identifier of the start/end pseudo state.
pub const PSEUDO_STATE: &str = "[*]";

/// A parsed or built state diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDiagram {
    pub meta: Metadata,
    pub direction: Direction,
    pub body: StateBody,
    pub notes: Vec<StateNote>,
    pub class_defs: IndexMap<String, ClassDef>,
}

impl StateDiagram {
    /// Every declared state id, depth first through composites.
    pub fn state_ids(&self) -> Vec<&str> {
        fn walk<'a>(body: &'a StateBody, out: &mut Vec<&'a str>) {
            for (id, state) in &body.states {
                out.push(id);
                if let Some(child) = &state.body {
                    walk(child, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.body, &mut out);
        out
    }
}

/// States and transitions of one scope (the diagram or a composite state).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateBody {
    /// Direction override inside a composite; always `None` at the top level.
    pub direction: Option<Direction>,
    pub states: IndexMap<String, State>,
    pub transitions: Vec<Transition>,
}

/// Special state kinds declared with `<<fork>>`, `<<join>>` or `<<choice>>`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    #[default]
    Simple,
    Fork,
    Join,
    Choice,
}

impl StateKind {
    pub fn stereotype(self) -> Option<&'static str> {
        match self {
            StateKind::Simple => None,
            StateKind::Fork => Some("fork"),
            StateKind::Join => Some("join"),
            StateKind::Choice => Some("choice"),
        }
    }
}

/// A declared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub description: Option<String>,
    pub kind: StateKind,
    /// Present for composite states.
    pub body: Option<StateBody>,
    pub classes: Vec<String>,
}

impl State {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            kind: StateKind::Simple,
            body: None,
            classes: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: StateKind) -> Self {
        self.kind = kind;
        self
    }
}

/// `A --> B : label`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl Transition {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Side of a state note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteSide {
    Left,
    Right,
}

impl NoteSide {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteSide::Left => "left of",
            NoteSide::Right => "right of",
        }
    }
}

/// `note right of S : text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNote {
    pub side: NoteSide,
    pub state: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_ids_include_composite_children() {
        let mut child = StateBody::default();
        child.states.insert("Inner".into(), State::new("Inner"));
        let mut composite = State::new("Outer");
        composite.body = Some(child);

        let mut diagram = StateDiagram::default();
        diagram.body.states.insert("Outer".into(), composite);
        diagram.body.states.insert("After".into(), State::new("After"));

        assert_eq!(diagram.state_ids(), vec!["Outer", "Inner", "After"]);
    }
}
