//! State diagram parser (`stateDiagram-v2`, also `stateDiagram`).
//!
//! `state` declarations, `Id : description` lines and class assignments
//! declare states. Transition endpoints are kept as written.

use diagrammar_core::{
    DialectTag,
    structure::state::{
        NoteSide, PSEUDO_STATE, State, StateBody, StateDiagram, StateKind, StateNote, Transition,
    },
};
use log::debug;
use winnow::{
    Parser,
    combinator::{alt, delimited, opt, preceded, terminated},
};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{IResult, ident, keyword, name, quoted, rest_trimmed, ws, ws1},
    source::{self, Line},
};

/// Parse state diagram text.
pub fn parse(text: &str) -> Result<StateDiagram, ParseError> {
    let source = source::prepare(text, DialectTag::State)?;
    let mut acc = Accumulator {
        diagram: StateDiagram {
            meta: source.metadata(),
            ..StateDiagram::default()
        },
        frames: Vec::new(),
        note: None,
    };
    for line in &source.body {
        acc.statement(line)?;
    }
    acc.finish()
}

/// A composite state whose body is being filled.
struct Frame<'s> {
    id: String,
    body: StateBody,
    line: Line<'s>,
}

/// A `note ... end note` block being collected.
struct PendingNote<'s> {
    side: NoteSide,
    state: String,
    lines: Vec<&'s str>,
    line: Line<'s>,
}

struct Accumulator<'s> {
    diagram: StateDiagram,
    frames: Vec<Frame<'s>>,
    note: Option<PendingNote<'s>>,
}

impl<'s> Accumulator<'s> {
    fn statement(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        if let Some(note) = &mut self.note {
            if line.text == "end note" {
                if let Some(note) = self.note.take() {
                    self.diagram.notes.push(StateNote {
                        side: note.side,
                        state: note.state,
                        text: note.lines.join("\n"),
                    });
                }
            } else {
                note.lines.push(line.text);
            }
            return Ok(());
        }

        if line.text == "}" {
            return self.close(line);
        }
        if common::metadata_statement(line, &mut self.diagram.meta) {
            return Ok(());
        }
        if let Some(direction) = common::direction_statement(line) {
            match self.frames.last_mut() {
                Some(frame) => frame.body.direction = Some(direction),
                None => self.diagram.direction = direction,
            }
            return Ok(());
        }
        if let Some(defs) = common::class_def_statement(line) {
            for def in defs {
                self.diagram.class_defs.insert(def.name().to_string(), def);
            }
            return Ok(());
        }
        if let Some((targets, class)) = common::class_assignment_statement(line) {
            for target in targets {
                let state = self.class_target(&target);
                if !state.classes.contains(&class) {
                    state.classes.push(class.clone());
                }
            }
            return Ok(());
        }
        if let Ok((id, class)) = class_shorthand.parse(line.text) {
            let state = self.class_target(id);
            if !state.classes.iter().any(|c| c == class) {
                state.classes.push(class.to_string());
            }
            return Ok(());
        }
        if let Ok(decl) = state_declaration.parse(line.text) {
            let state = self.declare(decl.id);
            if let Some(description) = decl.description {
                state.description = Some(description);
            }
            if decl.kind != StateKind::Simple {
                state.kind = decl.kind;
            }
            if decl.opens_body {
                let body = state.body.take().unwrap_or_default();
                self.frames.push(Frame {
                    id: decl.id.to_string(),
                    body,
                    line: *line,
                });
            }
            return Ok(());
        }
        if let Ok((side, state, text)) = note_statement.parse(line.text) {
            match text {
                Some(text) => self.diagram.notes.push(StateNote {
                    side,
                    state: state.to_string(),
                    text: text.to_string(),
                }),
                None => {
                    self.note = Some(PendingNote {
                        side,
                        state: state.to_string(),
                        lines: Vec::new(),
                        line: *line,
                    })
                }
            }
            return Ok(());
        }
        if let Ok(transition) = transition.parse(line.text) {
            self.current_body().transitions.push(transition);
            return Ok(());
        }
        if let Ok((id, description)) = description_statement.parse(line.text) {
            self.declare(id).description = Some(description.to_string());
            return Ok(());
        }
        Err(line.unexpected())
    }

    fn current_body(&mut self) -> &mut StateBody {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.body,
            None => &mut self.diagram.body,
        }
    }

    /// Find or create `id` in the innermost scope.
    fn declare(&mut self, id: &str) -> &mut State {
        self.current_body()
            .states
            .entry(id.to_string())
            .or_insert_with(|| State::new(id))
    }

    /// The state named by a `class` statement, wherever it was declared.
    fn class_target(&mut self, id: &str) -> &mut State {
        let found = std::iter::once(&self.diagram.body)
            .chain(self.frames.iter().map(|frame| &frame.body))
            .enumerate()
            .find_map(|(scope, body)| state_path(body, id).map(|path| (scope, path)));
        let Some((scope, path)) = found else {
            return self.declare(id);
        };

        let mut body = match scope {
            0 => &mut self.diagram.body,
            n => &mut self.frames[n - 1].body,
        };
        for composite in path {
            body = body
                .states
                .entry(composite)
                .or_insert_with_key(|key| State::new(key.clone()))
                .body
                .get_or_insert_with(StateBody::default);
        }
        body.states
            .entry(id.to_string())
            .or_insert_with(|| State::new(id))
    }

    fn close(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        let Some(frame) = self.frames.pop() else {
            return Err(line.error(ErrorCode::E102, 0, "`}` without an open composite state"));
        };
        let state = self.declare(&frame.id);
        state.body = Some(frame.body);
        Ok(())
    }

    fn finish(self) -> Result<StateDiagram, ParseError> {
        if let Some(frame) = self.frames.first() {
            return Err(frame.line.error(
                ErrorCode::E101,
                0,
                format!("composite state `{}` is never closed", frame.id),
            ));
        }
        if let Some(note) = &self.note {
            return Err(note.line.error(ErrorCode::E101, 0, "note is never closed"));
        }
        debug!(
            states = self.diagram.state_ids().len(),
            transitions = self.diagram.body.transitions.len();
            "Parsed state diagram"
        );
        Ok(self.diagram)
    }
}

/// Composite ids leading from `body` to the scope that declares `id`.
fn state_path(body: &StateBody, id: &str) -> Option<Vec<String>> {
    if body.states.contains_key(id) {
        return Some(Vec::new());
    }
    body.states.iter().find_map(|(composite, state)| {
        let mut path = state_path(state.body.as_ref()?, id)?;
        path.insert(0, composite.clone());
        Some(path)
    })
}

/// `state Id`, `state "desc" as Id`, `state Id <<fork>>`, optionally opening `{`.
struct StateDeclaration<'s> {
    id: &'s str,
    description: Option<String>,
    kind: StateKind,
    opens_body: bool,
}

fn state_declaration<'s>(input: &mut &'s str) -> IResult<StateDeclaration<'s>> {
    (keyword("state"), ws1).parse_next(input)?;
    let (description, id) = alt((
        (terminated(quoted, (ws1, keyword("as"), ws1)), ident).map(|(d, id)| (Some(d), id)),
        ident.map(|id| (None, id)),
    ))
    .parse_next(input)?;
    let kind = opt(preceded(ws, stereotype))
        .parse_next(input)?
        .unwrap_or_default();
    ws.parse_next(input)?;
    let opens_body = opt('{').parse_next(input)?.is_some();
    Ok(StateDeclaration {
        id,
        description,
        kind,
        opens_body,
    })
}

fn stereotype(input: &mut &str) -> IResult<StateKind> {
    delimited(
        "<<",
        alt((
            "fork".value(StateKind::Fork),
            "join".value(StateKind::Join),
            "choice".value(StateKind::Choice),
        )),
        ">>",
    )
    .parse_next(input)
}

/// `note left of A : text`, or `note left of A` opening a block.
fn note_statement<'s>(input: &mut &'s str) -> IResult<(NoteSide, &'s str, Option<&'s str>)> {
    (keyword("note"), ws1).parse_next(input)?;
    let side = terminated(
        alt((
            keyword("left").value(NoteSide::Left),
            keyword("right").value(NoteSide::Right),
        )),
        (ws1, keyword("of"), ws1),
    )
    .parse_next(input)?;
    let state = ident.parse_next(input)?;
    ws.parse_next(input)?;
    let text = opt(preceded(':', rest_trimmed)).parse_next(input)?;
    Ok((side, state, text))
}

fn endpoint<'s>(input: &mut &'s str) -> IResult<&'s str> {
    alt((PSEUDO_STATE, ident)).parse_next(input)
}

/// `A --> B : label`
fn transition(input: &mut &str) -> IResult<Transition> {
    let source = terminated(endpoint, (ws, "-->", ws)).parse_next(input)?;
    let target = terminated(endpoint, ws).parse_next(input)?;
    let label = opt(preceded(':', rest_trimmed)).parse_next(input)?;
    let transition = Transition::new(source, target);
    Ok(match label.filter(|l| !l.is_empty()) {
        Some(label) => transition.with_label(label),
        None => transition,
    })
}

/// `Id:::name`
fn class_shorthand<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (terminated(ident, ":::"), terminated(name, ws)).parse_next(input)
}

/// `Id : description`
fn description_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (
        terminated(ident, (ws, ':')),
        rest_trimmed.verify(|d: &str| !d.is_empty()),
    )
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagrammar_core::structure::Direction;

    #[test]
    fn test_declarations_and_transitions() {
        let diagram = parse(
            "stateDiagram-v2\n    direction LR\n    [*] --> Still\n    Still --> Moving : push\n    state \"Waiting for input\" as Idle\n    state Split <<fork>>\n    Moving : in motion\n",
        )
        .unwrap();
        assert_eq!(diagram.direction, Direction::LeftToRight);
        let body = &diagram.body;
        assert_eq!(body.transitions[0].source, PSEUDO_STATE);
        assert_eq!(body.transitions[1].label.as_deref(), Some("push"));
        assert_eq!(
            body.states["Idle"].description.as_deref(),
            Some("Waiting for input")
        );
        assert_eq!(body.states["Split"].kind, StateKind::Fork);
        assert_eq!(body.states["Moving"].description.as_deref(), Some("in motion"));
        assert!(!body.states.contains_key("Still"));
    }

    #[test]
    fn test_composite_states() {
        let diagram = parse(
            "stateDiagram-v2\nstate Active {\n    direction TB\n    [*] --> Running\n    state Running {\n        Fast : go\n    }\n}\nstate Active {\n    Paused : hold\n}\n",
        )
        .unwrap();
        let active = diagram.body.states["Active"].body.as_ref().unwrap();
        assert_eq!(active.direction, Some(Direction::TopToBottom));
        assert_eq!(active.transitions.len(), 1);
        assert!(active.states.contains_key("Paused"));
        let running = active.states["Running"].body.as_ref().unwrap();
        assert!(running.states.contains_key("Fast"));
        assert_eq!(diagram.state_ids(), vec!["Active", "Running", "Fast", "Paused"]);
    }

    #[test]
    fn test_class_assignment_reaches_nested_states() {
        let diagram = parse(
            "stateDiagram-v2\nstate Outer {\n    Inner : x\n}\nclassDef hot fill:red\nclass Inner,Fresh hot\nInner:::cold\n",
        )
        .unwrap();
        let outer = diagram.body.states["Outer"].body.as_ref().unwrap();
        assert_eq!(outer.states["Inner"].classes, vec!["hot", "cold"]);
        assert_eq!(diagram.body.states["Fresh"].classes, vec!["hot"]);
    }

    #[test]
    fn test_notes() {
        let diagram = parse(
            "stateDiagram-v2\nnote left of A : inline\nnote right of B\n    first\n    second\nend note\n",
        )
        .unwrap();
        assert_eq!(diagram.notes[0].side, NoteSide::Left);
        assert_eq!(diagram.notes[0].text, "inline");
        assert_eq!(diagram.notes[1].text, "first\nsecond");
    }

    #[test]
    fn test_unbalanced_composites() {
        let err = parse("stateDiagram-v2\nA --> B\nstate C {\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E101, 3));
        let err = parse("stateDiagram-v2\n}\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::E102);
        let err = parse("stateDiagram-v2\nnote left of A\ntext\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::E101);
    }
}
