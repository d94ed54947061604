//! Sequence diagram parser (`sequenceDiagram`).
//!
//! Only `participant` and `actor` statements declare participants; message
//! and note endpoints are kept as written.

use diagrammar_core::{
    DialectTag,
    structure::sequence::{
        Activation, Block, BlockKind, BlockSection, Message, MessageArrow, NotePlacement,
        Participant, ParticipantKind, SequenceDiagram, SequenceNote, SequenceStatement,
    },
};
use log::debug;
use winnow::{
    Parser,
    ascii::Caseless,
    combinator::{alt, opt, preceded, terminated},
    error::{ContextError, ErrMode},
    token::take_till,
};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{IResult, backtrack, ident, keyword, rest_trimmed, split_list, ws, ws1},
    source::{self, Line},
};

/// Parse sequence diagram text.
pub fn parse(text: &str) -> Result<SequenceDiagram, ParseError> {
    let source = source::prepare(text, DialectTag::Sequence)?;
    let mut acc = Accumulator {
        diagram: SequenceDiagram {
            meta: source.metadata(),
            ..SequenceDiagram::default()
        },
        blocks: Vec::new(),
    };
    for line in &source.body {
        acc.statement(line)?;
    }
    acc.finish()
}

struct Accumulator<'s> {
    diagram: SequenceDiagram,
    /// Open blocks, innermost last.
    blocks: Vec<(Block, Line<'s>)>,
}

impl<'s> Accumulator<'s> {
    fn statement(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        if common::metadata_statement(line, &mut self.diagram.meta) {
            return Ok(());
        }
        if let Some(title) = common::title_statement(line)
            .or_else(|| preceded(("title", ws, ':'), rest_trimmed).parse(line.text).ok())
        {
            self.diagram.meta.title = (!title.is_empty()).then(|| title.to_string());
            return Ok(());
        }
        if keyword("autonumber").parse(line.text).is_ok() {
            self.diagram.autonumber = true;
            return Ok(());
        }
        if keyword("end").parse(line.text).is_ok() {
            return self.close(line);
        }
        if let Ok(participant) = participant_statement.parse(line.text) {
            self.diagram
                .participants
                .insert(participant.id.clone(), participant);
            return Ok(());
        }
        if let Ok((activate, id)) = activation_statement.parse(line.text) {
            let id = id.to_string();
            self.push(if activate {
                SequenceStatement::Activate(id)
            } else {
                SequenceStatement::Deactivate(id)
            });
            return Ok(());
        }
        if let Ok(note) = note_statement.parse(line.text) {
            self.push(SequenceStatement::Note(note));
            return Ok(());
        }
        if let Some(label) = self.section_statement(line) {
            if let Some((block, _)) = self.blocks.last_mut() {
                block.sections.push(BlockSection {
                    label: label.to_string(),
                    statements: Vec::new(),
                });
            }
            return Ok(());
        }
        if let Ok((kind, label)) = block_open.parse(line.text) {
            let block = Block {
                kind,
                sections: vec![BlockSection {
                    label: label.to_string(),
                    statements: Vec::new(),
                }],
            };
            self.blocks.push((block, *line));
            return Ok(());
        }
        if let Ok(message) = message.parse(line.text) {
            self.push(SequenceStatement::Message(message));
            return Ok(());
        }
        Err(line.unexpected())
    }

    /// `else`, `and` or `option` inside a block of the matching kind.
    fn section_statement(&self, line: &Line<'s>) -> Option<&'s str> {
        let (block, _) = self.blocks.last()?;
        let word = block.kind.section_keyword()?;
        block_label(word).parse(line.text).ok()
    }

    fn push(&mut self, statement: SequenceStatement) {
        let target = match self.blocks.last_mut() {
            Some((block, _)) => match block.sections.last_mut() {
                Some(section) => &mut section.statements,
                None => return,
            },
            None => &mut self.diagram.statements,
        };
        target.push(statement);
    }

    fn close(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        let Some((block, _)) = self.blocks.pop() else {
            return Err(line.error(ErrorCode::E102, 0, "`end` without an open block"));
        };
        self.push(SequenceStatement::Block(block));
        Ok(())
    }

    fn finish(self) -> Result<SequenceDiagram, ParseError> {
        if let Some((block, line)) = self.blocks.first() {
            return Err(line.error(
                ErrorCode::E101,
                0,
                format!("`{}` block is never closed", block.kind.keyword()),
            ));
        }
        debug!(
            participants = self.diagram.participants.len(),
            statements = self.diagram.statements.len();
            "Parsed sequence diagram"
        );
        Ok(self.diagram)
    }
}

/// `participant A`, `participant A as Alice`, `actor B`
fn participant_statement(input: &mut &str) -> IResult<Participant> {
    let kind = terminated(
        alt((
            keyword("participant").value(ParticipantKind::Participant),
            keyword("actor").value(ParticipantKind::Actor),
        )),
        ws1,
    )
    .parse_next(input)?;
    let id = ident.parse_next(input)?;
    let label = opt(preceded((ws1, keyword("as"), ws1), rest_trimmed)).parse_next(input)?;
    ws.parse_next(input)?;

    let mut participant = Participant::new(id);
    participant.kind = kind;
    participant.label = label.filter(|l| !l.is_empty()).map(str::to_string);
    Ok(participant)
}

/// `activate A` / `deactivate A`
fn activation_statement<'s>(input: &mut &'s str) -> IResult<(bool, &'s str)> {
    (
        terminated(
            alt((keyword("activate").value(true), keyword("deactivate").value(false))),
            ws1,
        ),
        terminated(ident, ws),
    )
        .parse_next(input)
}

/// `Note right of A: text`, `note over A,B: text`
fn note_statement(input: &mut &str) -> IResult<SequenceNote> {
    (Caseless("note"), ws1).parse_next(input)?;
    let placement = terminated(
        alt((
            (keyword("left"), ws1, keyword("of")).value(NotePlacement::LeftOf),
            (keyword("right"), ws1, keyword("of")).value(NotePlacement::RightOf),
            keyword("over").value(NotePlacement::Over),
        )),
        ws1,
    )
    .parse_next(input)?;
    let participants = take_till(1.., ':').parse_next(input)?;
    let text = preceded(':', rest_trimmed).parse_next(input)?;
    let participants = split_list(participants);
    if participants.is_empty() {
        return backtrack();
    }
    Ok(SequenceNote {
        placement,
        participants,
        text: text.to_string(),
    })
}

/// `loop label`, `alt label`, ...
fn block_open<'s>(input: &mut &'s str) -> IResult<(BlockKind, &'s str)> {
    let text: &'s str = *input;
    for kind in BlockKind::ALL {
        let mut attempt = text;
        if let Ok(label) = block_label(kind.keyword()).parse_next(&mut attempt) {
            *input = attempt;
            return Ok((kind, label));
        }
    }
    backtrack()
}

/// `word` followed by an optional label.
fn block_label<'s>(
    word: &'static str,
) -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    move |input: &mut &'s str| {
        keyword(word).parse_next(input)?;
        rest_trimmed.parse_next(input)
    }
}

/// `A->>+B: text`
fn message(input: &mut &str) -> IResult<Message> {
    let source = terminated(ident, ws).parse_next(input)?;
    let arrow = arrow.parse_next(input)?;
    let activation = opt(alt((
        '+'.value(Activation::Activate),
        '-'.value(Activation::Deactivate),
    )))
    .parse_next(input)?
    .unwrap_or_default();
    ws.parse_next(input)?;
    let target = terminated(ident, ws).parse_next(input)?;
    let text = opt(preceded(':', rest_trimmed)).parse_next(input)?;

    Ok(Message::new(source, target, text.unwrap_or(""))
        .with_arrow(arrow)
        .with_activation(activation))
}

fn arrow(input: &mut &str) -> IResult<MessageArrow> {
    for arrow in MessageArrow::PARSE_ORDER {
        if let Some(rest) = input.strip_prefix(arrow.token()) {
            *input = rest;
            return Ok(arrow);
        }
    }
    backtrack()
}
