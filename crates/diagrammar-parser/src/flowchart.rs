//! Flowchart parser (`flowchart` / `graph`).
//!
//! Node mentions declare nodes: a standalone node statement, every node spec
//! of a link chain and every target of a `class` statement. A later spec with
//! a shape overrides the label and shape of an earlier one. A node becomes a
//! member of the innermost open subgraph the first time it is mentioned there,
//! unless another subgraph already owns it. `style` targets are kept as written.
//! Statement keywords cannot be node ids, since a declaration line for one
//! would read back as that statement.

use diagrammar_core::{
    DialectTag,
    structure::{
        Direction,
        flowchart::{
            ArrowHead, FlowLink, FlowNode, Flowchart, LinkSelector, LinkStroke, LinkStyle,
            NodeShape, NodeStyle, Subgraph, is_reserved_id,
        },
    },
    text::{decode_entities, is_ident_char},
};
use log::debug;
use winnow::{
    Parser,
    combinator::{alt, delimited, opt, preceded, repeat, separated},
    token::take_till,
};

use crate::{
    common,
    error::{ErrorCode, ParseError},
    lexeme::{
        IResult, backtrack, ident, keyword, name, quoted, rest_trimmed, run, split_list, ws, ws1,
    },
    source::{self, Line},
};

/// Characters that end an unquoted node label.
const LABEL_STOP: [char; 10] = ['[', ']', '{', '}', '(', ')', '|', '"', '<', '>'];

/// Parse flowchart text.
pub fn parse(text: &str) -> Result<Flowchart, ParseError> {
    let source = source::prepare(text, DialectTag::Flowchart)?;
    let direction = match &source.header {
        Some(header) if !header.text.is_empty() => header
            .text
            .trim_end_matches(';')
            .parse::<Direction>()
            .map_err(|_| header.unexpected())?,
        _ => Direction::default(),
    };

    let mut acc = Accumulator {
        chart: Flowchart {
            meta: source.metadata(),
            ..Flowchart::new(direction)
        },
        open: Vec::new(),
    };
    for line in &source.body {
        acc.statement(line)?;
    }
    acc.finish()
}

/// Per-call parse state.
struct Accumulator<'s> {
    chart: Flowchart,
    /// Open subgraphs, innermost last, with the line that opened each.
    open: Vec<(Subgraph, Line<'s>)>,
}

impl<'s> Accumulator<'s> {
    fn statement(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        let line = &Line {
            text: line.text.trim_end_matches(';').trim_end(),
            ..*line
        };

        if common::metadata_statement(line, &mut self.chart.meta) {
            return Ok(());
        }
        if keyword("end").parse(line.text).is_ok() {
            return self.close_subgraph(line);
        }
        if let Ok(rest) = preceded((keyword("subgraph"), ws1), rest_trimmed).parse(line.text) {
            let subgraph = subgraph_header(rest).ok_or_else(|| line.unexpected())?;
            self.open.push((subgraph, *line));
            return Ok(());
        }
        if let Some(direction) = common::direction_statement(line) {
            match self.open.last_mut() {
                Some((subgraph, _)) => subgraph.direction = Some(direction),
                None => self.chart.direction = direction,
            }
            return Ok(());
        }
        if let Some(defs) = common::class_def_statement(line) {
            for def in defs {
                self.chart.class_defs.insert(def.name().to_string(), def);
            }
            return Ok(());
        }
        if let Some((targets, class)) = common::class_assignment_statement(line) {
            for target in targets {
                if is_reserved_id(&target) {
                    let offset = line.text.get(5..).and_then(|t| t.find(target.as_str()));
                    return Err(reserved(line, &target, offset.map(|i| i + 5)));
                }
                let node = self
                    .chart
                    .nodes
                    .entry(target.clone())
                    .or_insert_with(|| FlowNode::new(target));
                if !node.classes.contains(&class) {
                    node.classes.push(class.clone());
                }
            }
            return Ok(());
        }
        if let Ok((node, props)) = style_statement.parse(line.text) {
            self.chart.styles.push(NodeStyle {
                node: node.to_string(),
                properties: split_list(props),
            });
            return Ok(());
        }
        if let Ok((selector, props)) = link_style_statement.parse(line.text) {
            self.chart.link_styles.push(LinkStyle {
                selector,
                properties: split_list(props),
            });
            return Ok(());
        }

        let (head, tail) = run(line, chain)?;
        let mut mentioned = head.iter().chain(tail.iter().flat_map(|(_, group)| group));
        if let Some(spec) = mentioned.find(|spec| is_reserved_id(spec.id)) {
            return Err(reserved(line, spec.id, Some(line.offset_of(spec.id))));
        }
        self.apply_chain(head, tail);
        Ok(())
    }

    fn close_subgraph(&mut self, line: &Line<'s>) -> Result<(), ParseError> {
        let Some((subgraph, _)) = self.open.pop() else {
            return Err(line.error(ErrorCode::E102, 0, "`end` without an open subgraph"));
        };
        match self.open.last_mut() {
            Some((parent, _)) => parent.subgraphs.push(subgraph),
            None => self.chart.subgraphs.push(subgraph),
        }
        Ok(())
    }

    fn apply_chain(&mut self, head: Vec<NodeSpec<'s>>, tail: Vec<(LinkSpec, Vec<NodeSpec<'s>>)>) {
        let mut previous: Vec<&'s str> = head.iter().map(|spec| spec.id).collect();
        for spec in head {
            self.declare(spec);
        }
        for (link, group) in tail {
            let current: Vec<&'s str> = group.iter().map(|spec| spec.id).collect();
            for spec in group {
                self.declare(spec);
            }
            for source in &previous {
                for target in &current {
                    self.chart.links.push(link.to_link(source, target));
                }
            }
            previous = current;
        }
    }

    fn declare(&mut self, spec: NodeSpec<'s>) {
        let node = self
            .chart
            .nodes
            .entry(spec.id.to_string())
            .or_insert_with(|| FlowNode::new(spec.id));
        if let Some((shape, label)) = spec.shape {
            node.shape = shape;
            node.label = label;
        }
        for class in spec.classes {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }

        let owned = self.chart.is_subgraph_member(spec.id)
            || self.open.iter().any(|(sg, _)| sg.contains(spec.id));
        if owned {
            return;
        }
        if let Some((innermost, _)) = self.open.last_mut() {
            innermost.nodes.push(spec.id.to_string());
        }
    }

    fn finish(self) -> Result<Flowchart, ParseError> {
        if let Some((subgraph, line)) = self.open.first() {
            return Err(line.error(
                ErrorCode::E101,
                0,
                format!("subgraph `{}` is never closed", subgraph.id),
            ));
        }
        debug!(
            nodes = self.chart.nodes.len(),
            links = self.chart.links.len(),
            subgraphs = self.chart.subgraphs.len();
            "Parsed flowchart"
        );
        Ok(self.chart)
    }
}

fn reserved(line: &Line<'_>, id: &str, offset: Option<usize>) -> ParseError {
    line.error(
        ErrorCode::E103,
        offset.unwrap_or(0),
        format!("`{id}` is a reserved word and cannot be a node id"),
    )
}

/// `id`, `id [Title]`, `id["Title"]`, or a free-form id.
fn subgraph_header(rest: &str) -> Option<Subgraph> {
    let titled = (
        ident,
        preceded(ws, delimited('[', take_till(1.., ']'), ']')),
    )
        .parse(rest);
    if let Ok((id, title)) = titled {
        let mut subgraph = Subgraph::new(id);
        subgraph.title = Some(unquote_label(title.trim()));
        return Some(subgraph);
    }
    let id = unquote_label(rest);
    (!id.is_empty()).then(|| Subgraph::new(id))
}

/// Strip one pair of surrounding quotes and decode entities inside them.
fn unquote_label(text: &str) -> String {
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) if !inner.contains('"') => decode_entities(inner),
        _ => text.to_string(),
    }
}

fn style_statement<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    preceded(
        (keyword("style"), ws1),
        (ident, preceded(ws1, rest_trimmed)),
    )
    .parse_next(input)
}

fn link_style_statement<'s>(input: &mut &'s str) -> IResult<(LinkSelector, &'s str)> {
    preceded(
        (keyword("linkStyle"), ws1),
        (link_selector, preceded(ws1, rest_trimmed)),
    )
    .parse_next(input)
}

fn link_selector(input: &mut &str) -> IResult<LinkSelector> {
    if opt(keyword("default")).parse_next(input)?.is_some() {
        return Ok(LinkSelector::Default);
    }
    let indices = take_till(1.., [' ', '\t'])
        .verify_map(|list: &str| {
            list.split(',')
                .map(|i| i.trim().parse::<usize>().ok())
                .collect::<Option<Vec<_>>>()
        })
        .parse_next(input)?;
    Ok(LinkSelector::Indices(indices))
}

/// A node mention inside a statement.
struct NodeSpec<'s> {
    id: &'s str,
    shape: Option<(NodeShape, String)>,
    classes: Vec<&'s str>,
}

/// A parsed link operator with its optional label.
#[derive(Debug, Clone, PartialEq)]
struct LinkSpec {
    stroke: LinkStroke,
    start: ArrowHead,
    end: ArrowHead,
    length: usize,
    label: Option<String>,
}

impl LinkSpec {
    fn to_link(&self, source: &str, target: &str) -> FlowLink {
        FlowLink {
            source: source.to_string(),
            target: target.to_string(),
            stroke: self.stroke,
            start: self.start,
            end: self.end,
            label: self.label.clone(),
            length: self.length,
        }
    }
}

type Tail<'s> = Vec<(LinkSpec, Vec<NodeSpec<'s>>)>;

/// `group (link group)*`
fn chain<'s>(input: &mut &'s str) -> IResult<(Vec<NodeSpec<'s>>, Tail<'s>)> {
    (
        group,
        repeat(0.., (preceded(ws, link), preceded(ws, group))),
    )
        .parse_next(input)
}

/// `node (& node)*`
fn group<'s>(input: &mut &'s str) -> IResult<Vec<NodeSpec<'s>>> {
    separated(1.., node_spec, (ws, '&', ws)).parse_next(input)
}

fn node_spec<'s>(input: &mut &'s str) -> IResult<NodeSpec<'s>> {
    let id = ident.parse_next(input)?;
    let shape = opt(shape).parse_next(input)?;
    let classes = repeat(0.., preceded(":::", name)).parse_next(input)?;
    Ok(NodeSpec { id, shape, classes })
}

fn shape<'s>(input: &mut &'s str) -> IResult<(NodeShape, String)> {
    let text: &'s str = *input;
    for shape in NodeShape::ALL {
        let (open, close) = shape.delimiters();
        let Some(body) = text.strip_prefix(open) else {
            continue;
        };
        if let Some((label, rest)) = shape_body(body, close) {
            *input = rest;
            return Ok((shape, label));
        }
    }
    backtrack()
}

/// Read a label and the closing delimiter, returning the label and what follows.
fn shape_body<'s>(text: &'s str, close: &str) -> Option<(String, &'s str)> {
    if let Some(body) = text.strip_prefix('"') {
        let end = body.find('"')?;
        let rest = body[end + 1..].strip_prefix(close)?;
        return Some((decode_entities(&body[..end]), rest));
    }

    let end = text.find(LABEL_STOP).unwrap_or(text.len());
    let content = &text[..end];
    // Slanted closers (`/]`, `\]`) start with a character that is legal in a label.
    let (content, close) = match close.chars().next() {
        Some(c @ ('/' | '\\')) => (content.strip_suffix(c)?, &close[1..]),
        _ => (content, close),
    };
    let rest = text[end..].strip_prefix(close)?;
    let label = content.trim();
    (!label.is_empty()).then(|| (label.to_string(), rest))
}

fn link<'s>(input: &mut &'s str) -> IResult<LinkSpec> {
    let text: &'s str = *input;
    let (start, body) = start_head(text);
    let Some((mut spec, rest)) = labelled_link(body).or_else(|| plain_link(body)) else {
        return backtrack();
    };
    if spec.stroke == LinkStroke::Invisible && start != ArrowHead::None {
        return backtrack();
    }
    spec.start = start;
    *input = rest;

    if spec.label.is_none() {
        spec.label = opt(preceded(ws, pipe_label)).parse_next(input)?;
    }
    Ok(spec)
}

fn start_head(text: &str) -> (ArrowHead, &str) {
    let mut chars = text.chars();
    let head = match (chars.next(), chars.next()) {
        (Some('<'), Some('-' | '=')) => ArrowHead::Arrow,
        (Some('o'), Some('-' | '=')) => ArrowHead::Circle,
        (Some('x'), Some('-' | '=')) => ArrowHead::Cross,
        _ => return (ArrowHead::None, text),
    };
    (head, &text[1..])
}

fn end_head(text: &str) -> (ArrowHead, usize) {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('>'), _) => (ArrowHead::Arrow, 1),
        (Some(c @ ('o' | 'x')), next) if !next.is_some_and(is_ident_char) => {
            let head = if c == 'o' {
                ArrowHead::Circle
            } else {
                ArrowHead::Cross
            };
            (head, 1)
        }
        _ => (ArrowHead::None, 0),
    }
}

/// A complete operator without a start head: `-->`, `---`, `==>`, `-.->`, `~~~`, ...
fn plain_link(text: &str) -> Option<(LinkSpec, &str)> {
    let (stroke, length, end, consumed) = operator(text)?;
    let spec = LinkSpec {
        stroke,
        start: ArrowHead::None,
        end,
        length,
        label: None,
    };
    Some((spec, &text[consumed..]))
}

fn operator(text: &str) -> Option<(LinkStroke, usize, ArrowHead, usize)> {
    if text.starts_with('~') {
        let n = text.chars().take_while(|&c| c == '~').count();
        return (n >= 3).then_some((LinkStroke::Invisible, n - 2, ArrowHead::None, n));
    }
    if let Some(after) = text.strip_prefix("-").filter(|after| after.starts_with('.')) {
        return dotted_close(after).map(|(length, end, consumed)| {
            (LinkStroke::Dotted, length, end, consumed + 1)
        });
    }

    let (stroke, c) = match text.chars().next()? {
        '-' => (LinkStroke::Normal, '-'),
        '=' => (LinkStroke::Thick, '='),
        _ => return None,
    };
    let n = text.chars().take_while(|&x| x == c).count();
    let (end, head_len) = end_head(&text[n..]);
    let length = match end {
        ArrowHead::None if n >= 3 => n - 2,
        ArrowHead::None => return None,
        _ if n >= 2 => n - 1,
        _ => return None,
    };
    Some((stroke, length, end, n + head_len))
}

/// `.-`, `.->`, `..-x`: dots, a dash and an optional head.
fn dotted_close(text: &str) -> Option<(usize, ArrowHead, usize)> {
    let dots = text.chars().take_while(|&c| c == '.').count();
    if dots == 0 || !text[dots..].starts_with('-') {
        return None;
    }
    let (end, head_len) = end_head(&text[dots + 1..]);
    Some((dots, end, dots + 1 + head_len))
}

/// `-- text -->`, `== text ==>`, `-. text .->`
fn labelled_link(text: &str) -> Option<(LinkSpec, &str)> {
    let (stroke, after) = [
        ("--", LinkStroke::Normal),
        ("==", LinkStroke::Thick),
        ("-.", LinkStroke::Dotted),
    ]
    .into_iter()
    .find_map(|(open, stroke)| text.strip_prefix(open).map(|rest| (stroke, rest)))?;
    if !after.starts_with([' ', '\t']) {
        return None;
    }

    let close_at = match stroke {
        LinkStroke::Dotted => {
            let found = after.find(".-")?;
            found - after[..found].chars().rev().take_while(|&c| c == '.').count()
        }
        LinkStroke::Thick => after.find("==")?,
        _ => after.find("--")?,
    };
    let label = unquote_label(after[..close_at].trim());
    if label.is_empty() {
        return None;
    }

    let closing = &after[close_at..];
    let (length, end, consumed) = match stroke {
        LinkStroke::Dotted => dotted_close(closing)?,
        _ => {
            let (close_stroke, length, end, consumed) = operator(closing)?;
            if close_stroke != stroke {
                return None;
            }
            (length, end, consumed)
        }
    };
    let spec = LinkSpec {
        stroke,
        start: ArrowHead::None,
        end,
        length,
        label: Some(label),
    };
    Some((spec, &closing[consumed..]))
}

/// `|text|` or `|"text"|`
fn pipe_label(input: &mut &str) -> IResult<String> {
    delimited(
        '|',
        alt((
            delimited(ws, quoted, ws),
            take_till(0.., '|').map(|text: &str| text.trim().to_string()),
        )),
        '|',
    )
    .parse_next(input)
}
