//! Canonical state diagram text.

use diagrammar_core::structure::{
    Direction,
    state::{State, StateBody, StateDiagram, StateNote, Transition},
};

use super::{declaration_order, quoted, style_list, writer::Writer};
use crate::config::RenderOptions;

/// Render a state diagram.
///
/// Each scope lists its declarations before its transitions; notes,
/// `classDef` and `class` statements follow at the top level.
pub fn state(diagram: &StateDiagram, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&diagram.meta);
    w.header("stateDiagram-v2");
    w.accessibility(&diagram.meta);
    if diagram.direction != Direction::TopToBottom {
        w.line(format!("direction {}", diagram.direction));
    }

    let mut classed = Vec::new();
    write_body(&mut w, &diagram.body, &mut classed);

    for note in &diagram.notes {
        write_note(&mut w, note);
    }
    for def in diagram.class_defs.values() {
        w.line(format!("classDef {} {}", def.name(), style_list(def.styles())));
    }
    for state in classed {
        for class in &state.classes {
            w.line(format!("class {} {class}", state.id));
        }
    }
    w.finish()
}

fn write_body<'a>(w: &mut Writer<'_>, body: &'a StateBody, classed: &mut Vec<&'a State>) {
    let states: Vec<&State> = body.states.values().collect();
    for state in declaration_order(states, w.options(), |s: &State| s.id.as_str()) {
        if !state.classes.is_empty() {
            classed.push(state);
        }
        let head = declaration(state);
        match &state.body {
            Some(inner) => {
                w.line(format!("{head} {{"));
                w.nested(|w| {
                    if let Some(direction) = inner.direction {
                        w.line(format!("direction {direction}"));
                    }
                    write_body(w, inner, classed);
                });
                w.line("}");
            }
            None => w.line(head),
        }
    }
    for transition in &body.transitions {
        w.line(transition_text(transition));
    }
}

/// `state A`, `state "Waiting" as A`, `state Split <<fork>>`
fn declaration(state: &State) -> String {
    let mut text = match &state.description {
        Some(description) => format!("state {} as {}", quoted(description), state.id),
        None => format!("state {}", state.id),
    };
    if let Some(stereotype) = state.kind.stereotype() {
        text.push_str(&format!(" <<{stereotype}>>"));
    }
    text
}

fn transition_text(transition: &Transition) -> String {
    match transition.label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => {
            format!("{} --> {} : {label}", transition.source, transition.target)
        }
        _ => format!("{} --> {}", transition.source, transition.target),
    }
}

/// Single-line notes stay inline; longer ones become a `note ... end note` block.
fn write_note(w: &mut Writer<'_>, note: &StateNote) {
    let head = format!("note {} {}", note.side.as_str(), note.state);
    let lines: Vec<&str> = note
        .text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        w.line(format!("{head} : {}", lines.concat()));
        return;
    }
    w.line(head);
    w.nested(|w| {
        for line in lines {
            w.line(line);
        }
    });
    w.line("end note");
}

#[cfg(test)]
mod tests {
    use diagrammar_core::structure::{
        ClassDef,
        state::{NoteSide, PSEUDO_STATE, StateKind},
    };

    use super::*;

    #[test]
    fn test_declarations_before_transitions() {
        let mut diagram = StateDiagram {
            direction: Direction::LeftToRight,
            ..StateDiagram::default()
        };
        let body = &mut diagram.body;
        body.states
            .insert("Idle".into(), State::new("Idle").with_description("Waiting \"now\""));
        body.states
            .insert("Split".into(), State::new("Split").with_kind(StateKind::Fork));
        body.transitions.push(Transition::new(PSEUDO_STATE, "Idle"));
        body.transitions
            .push(Transition::new("Idle", "Split").with_label("go"));

        assert_eq!(
            state(&diagram, &RenderOptions::default()),
            "stateDiagram-v2\n    direction LR\n    state \"Waiting #quot;now#quot;\" as Idle\n    state Split <<fork>>\n    [*] --> Idle\n    Idle --> Split : go\n"
        );
    }

    #[test]
    fn test_composites_and_classes() {
        let mut inner = StateBody {
            direction: Some(Direction::RightToLeft),
            ..StateBody::default()
        };
        let mut running = State::new("Running");
        running.classes.push("hot".into());
        inner.states.insert("Running".into(), running);
        inner.transitions.push(Transition::new(PSEUDO_STATE, "Running"));
        let mut active = State::new("Active");
        active.body = Some(inner);

        let mut diagram = StateDiagram::default();
        diagram.body.states.insert("Active".into(), active);
        diagram
            .class_defs
            .insert("hot".into(), ClassDef::new("hot", ["fill:red"]));

        assert_eq!(
            state(&diagram, &RenderOptions::default()),
            "stateDiagram-v2\n    state Active {\n        direction RL\n        state Running\n        [*] --> Running\n    }\n    classDef hot fill:red\n    class Running hot\n"
        );
    }

    #[test]
    fn test_notes_inline_and_block() {
        let mut diagram = StateDiagram::default();
        diagram.notes.push(StateNote {
            side: NoteSide::Left,
            state: "A".into(),
            text: "short".into(),
        });
        diagram.notes.push(StateNote {
            side: NoteSide::Right,
            state: "A".into(),
            text: "first\nsecond".into(),
        });

        assert_eq!(
            state(&diagram, &RenderOptions::default()),
            "stateDiagram-v2\n    note left of A : short\n    note right of A\n        first\n        second\n    end note\n"
        );
    }
}
