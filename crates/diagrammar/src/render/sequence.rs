//! Canonical sequence diagram text.

use diagrammar_core::structure::sequence::{
    Activation, Block, Message, ParticipantKind, SequenceDiagram, SequenceNote,
    SequenceStatement,
};

use super::writer::{Writer, non_empty};
use crate::config::RenderOptions;

/// Render a sequence diagram.
pub fn sequence(diagram: &SequenceDiagram, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.header("sequenceDiagram");
    w.title(&diagram.meta);
    w.accessibility(&diagram.meta);
    if diagram.autonumber {
        w.line("autonumber");
    }

    let participants = super::declaration_order(
        diagram.participants.values().collect(),
        options,
        |p| p.id.as_str(),
    );
    for participant in participants {
        let keyword = match participant.kind {
            ParticipantKind::Participant => "participant",
            ParticipantKind::Actor => "actor",
        };
        match non_empty(&participant.label) {
            Some(label) => w.line(format!("{keyword} {} as {label}", participant.id)),
            None => w.line(format!("{keyword} {}", participant.id)),
        }
    }
    write_statements(&mut w, &diagram.statements);
    w.finish()
}

fn write_statements(w: &mut Writer<'_>, statements: &[SequenceStatement]) {
    for statement in statements {
        match statement {
            SequenceStatement::Message(message) => w.line(message_text(message)),
            SequenceStatement::Note(note) => w.line(note_text(note)),
            SequenceStatement::Activate(id) => w.line(format!("activate {id}")),
            SequenceStatement::Deactivate(id) => w.line(format!("deactivate {id}")),
            SequenceStatement::Block(block) => write_block(w, block),
        }
    }
}

/// `loop label ... end`, with `else` / `and` / `option` between sections.
///
/// Block kinds without a section keyword have their sections merged.
fn write_block(w: &mut Writer<'_>, block: &Block) {
    let keyword = block.kind.keyword();
    let mut sections = block.sections.iter();
    let label = sections.next().map_or("", |s| s.label.as_str());
    w.line(format!("{keyword} {label}"));
    if let Some(first) = block.sections.first() {
        w.nested(|w| write_statements(w, &first.statements));
    }
    for section in sections {
        if let Some(word) = block.kind.section_keyword() {
            w.line(format!("{word} {}", section.label));
        }
        w.nested(|w| write_statements(w, &section.statements));
    }
    w.line("end");
}

/// `A->>+B: text`
fn message_text(message: &Message) -> String {
    let activation = match message.activation {
        Activation::None => "",
        Activation::Activate => "+",
        Activation::Deactivate => "-",
    };
    format!(
        "{}{}{activation}{}: {}",
        message.source,
        message.arrow.token(),
        message.target,
        message.text
    )
}

/// `Note over A,B: text`
fn note_text(note: &SequenceNote) -> String {
    format!(
        "Note {} {}: {}",
        note.placement.as_str(),
        note.participants.join(","),
        note.text
    )
}
