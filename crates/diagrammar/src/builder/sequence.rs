//! Sequence diagram builder.

use std::mem;

use log::debug;
use thiserror::Error;

use diagrammar_core::structure::sequence::{
    Block, BlockKind, BlockSection, Message, NotePlacement, Participant, SequenceDiagram,
    SequenceNote, SequenceStatement,
};

use crate::config::BuildOptions;

/// A reference a sequence diagram could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceValidationError {
    #[error("unknown participant `{id}` referenced by {referenced_by}")]
    UnknownParticipant { id: String, referenced_by: String },
}

/// Statement methods shared by the diagram and block builders.
macro_rules! statement_methods {
    () => {
        pub fn message(mut self, message: Message) -> Self {
            self.statements_mut().push(SequenceStatement::Message(message));
            self
        }

        pub fn note<I, S>(
            mut self,
            placement: NotePlacement,
            participants: I,
            text: impl Into<String>,
        ) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.statements_mut().push(SequenceStatement::Note(SequenceNote {
                placement,
                participants: participants.into_iter().map(Into::into).collect(),
                text: text.into(),
            }));
            self
        }

        pub fn activate(mut self, id: impl Into<String>) -> Self {
            self.statements_mut().push(SequenceStatement::Activate(id.into()));
            self
        }

        pub fn deactivate(mut self, id: impl Into<String>) -> Self {
            self.statements_mut().push(SequenceStatement::Deactivate(id.into()));
            self
        }

        /// Open a `kind` block whose first section is labelled `label`.
        pub fn block<F>(mut self, kind: BlockKind, label: impl Into<String>, scope: F) -> Self
        where
            F: FnOnce(BlockBuilder) -> BlockBuilder,
        {
            let block = scope(BlockBuilder::new(kind, label)).into_block();
            self.statements_mut().push(SequenceStatement::Block(block));
            self
        }
    };
}

/// Accumulates a [`SequenceDiagram`].
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    diagram: SequenceDiagram,
}

impl SequenceBuilder {
    metadata_setters!(diagram);

    pub fn autonumber(mut self) -> Self {
        self.diagram.autonumber = true;
        self
    }

    /// Declare a participant or actor. Declaring an id again replaces its
    /// record in place.
    pub fn participant(mut self, participant: Participant) -> Self {
        self.diagram
            .participants
            .insert(participant.id.clone(), participant);
        self
    }

    statement_methods!();

    fn statements_mut(&mut self) -> &mut Vec<SequenceStatement> {
        &mut self.diagram.statements
    }

    /// Produce the sequence diagram.
    ///
    /// # Errors
    ///
    /// With validation enabled, fails on the first message endpoint, note
    /// participant or activation naming an undeclared participant, searching
    /// blocks depth first.
    pub fn build(self, options: BuildOptions) -> Result<SequenceDiagram, SequenceValidationError> {
        let diagram = self.diagram;
        debug!(
            participants = diagram.participants.len(),
            statements = diagram.statements.len(),
            validate = options.validate();
            "Building sequence diagram"
        );
        if options.validate() {
            validate(&diagram, &diagram.statements)?;
        }
        Ok(diagram)
    }
}

fn validate(
    diagram: &SequenceDiagram,
    statements: &[SequenceStatement],
) -> Result<(), SequenceValidationError> {
    let require = |id: &str, referenced_by: &dyn Fn() -> String| {
        if diagram.participants.contains_key(id) {
            Ok(())
        } else {
            Err(SequenceValidationError::UnknownParticipant {
                id: id.to_string(),
                referenced_by: referenced_by(),
            })
        }
    };

    for statement in statements {
        match statement {
            SequenceStatement::Message(message) => {
                let describe = || {
                    format!(
                        "message {}{}{}",
                        message.source,
                        message.arrow.token(),
                        message.target
                    )
                };
                require(&message.source, &describe)?;
                require(&message.target, &describe)?;
            }
            SequenceStatement::Note(note) => {
                for id in &note.participants {
                    require(id, &|| format!("note {}", note.placement.as_str()))?;
                }
            }
            SequenceStatement::Activate(id) => require(id, &|| "activate".to_string())?,
            SequenceStatement::Deactivate(id) => require(id, &|| "deactivate".to_string())?,
            SequenceStatement::Block(block) => {
                for section in &block.sections {
                    validate(diagram, &section.statements)?;
                }
            }
        }
    }
    Ok(())
}

/// Accumulates one `loop` / `alt` / `par` / ... block.
///
/// Statements go to the current section; [`section`](Self::section) starts
/// the next one (`else`, `and`, `option`).
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    kind: BlockKind,
    sections: Vec<BlockSection>,
    current: BlockSection,
}

impl BlockBuilder {
    fn new(kind: BlockKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            sections: Vec::new(),
            current: BlockSection {
                label: label.into(),
                statements: Vec::new(),
            },
        }
    }

    pub fn section(mut self, label: impl Into<String>) -> Self {
        let next = BlockSection {
            label: label.into(),
            statements: Vec::new(),
        };
        self.sections.push(mem::replace(&mut self.current, next));
        self
    }

    statement_methods!();

    fn statements_mut(&mut self) -> &mut Vec<SequenceStatement> {
        &mut self.current.statements
    }

    fn into_block(mut self) -> Block {
        self.sections.push(self.current);
        Block {
            kind: self.kind,
            sections: self.sections,
        }
    }
}
