//! Canonical flowchart text.
//!
//! Statement order: node declarations outside subgraphs, subgraphs with their
//! members, links, `classDef`, `class`, `style`, `linkStyle`. Every node is
//! declared exactly once, so links never carry shapes.

use std::borrow::Cow;

use diagrammar_core::structure::flowchart::{
    ArrowHead, FlowLink, FlowNode, Flowchart, LinkSelector, LinkStroke, NodeShape, Subgraph,
};
use indexmap::IndexSet;

use super::{declaration_order, quoted, style_list, writer::Writer};
use crate::config::RenderOptions;

/// Characters that force a node label into quotes.
const LABEL_SPECIALS: [char; 12] = ['[', ']', '{', '}', '(', ')', '|', '"', '<', '>', '/', '\\'];

/// Render a flowchart.
pub fn flowchart(chart: &Flowchart, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&chart.meta);
    w.header(&format!("flowchart {}", chart.direction));
    w.accessibility(&chart.meta);

    let mut declared = IndexSet::new();
    let top: Vec<&FlowNode> = chart
        .nodes
        .values()
        .filter(|node| !chart.is_subgraph_member(&node.id))
        .collect();
    for node in declaration_order(top, options, |n: &FlowNode| n.id.as_str()) {
        declared.insert(node.id.as_str());
        w.line(declaration(node, options));
    }
    for subgraph in &chart.subgraphs {
        write_subgraph(&mut w, chart, subgraph, &mut declared);
    }

    write_links(&mut w, &chart.links);

    for def in chart.class_defs.values() {
        w.line(format!("classDef {} {}", def.name(), style_list(def.styles())));
    }
    if !options.inline_classes() {
        for node in declared.iter().filter_map(|id| chart.nodes.get(*id)) {
            for class in &node.classes {
                w.line(format!("class {} {class}", node.id));
            }
        }
    }
    for style in &chart.styles {
        w.line(format!("style {} {}", style.node, style_list(&style.properties)));
    }
    for link_style in &chart.link_styles {
        let selector = match &link_style.selector {
            LinkSelector::Default => "default".to_string(),
            LinkSelector::Indices(indices) if indices.is_empty() => continue,
            LinkSelector::Indices(indices) => indices
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(","),
        };
        w.line(format!(
            "linkStyle {selector} {}",
            style_list(&link_style.properties)
        ));
    }
    w.finish()
}

fn write_subgraph<'a>(
    w: &mut Writer<'_>,
    chart: &'a Flowchart,
    subgraph: &'a Subgraph,
    declared: &mut IndexSet<&'a str>,
) {
    let header = match &subgraph.title {
        Some(title) => format!("subgraph {} [{}]", subgraph.id, subgraph_title(title)),
        None => format!("subgraph {}", subgraph.id),
    };
    w.line(header);
    w.nested(|w| {
        if let Some(direction) = subgraph.direction {
            w.line(format!("direction {direction}"));
        }
        let members: Vec<&str> = subgraph.nodes.iter().map(String::as_str).collect();
        for id in declaration_order(members, w.options(), |id: &str| id) {
            if !declared.insert(id) {
                continue;
            }
            match chart.nodes.get(id) {
                Some(node) => w.line(declaration(node, w.options())),
                None => w.line(id),
            }
        }
        for child in &subgraph.subgraphs {
            write_subgraph(w, chart, child, declared);
        }
    });
    w.line("end");
}

/// `A`, `A[label]`, `A(("label"))`, with `:::cls` when classes are inlined.
fn declaration(node: &FlowNode, options: &RenderOptions) -> String {
    let mut text = node.id.clone();
    if node.shape != NodeShape::Rect || node.label != node.id {
        let (open, close) = node.shape.delimiters();
        text.push_str(open);
        text.push_str(&node_label(&node.label));
        text.push_str(close);
    }
    if options.inline_classes() {
        for class in &node.classes {
            text.push_str(":::");
            text.push_str(class);
        }
    }
    text
}

fn node_label(label: &str) -> Cow<'_, str> {
    if label.is_empty() || label.trim() != label || label.contains(LABEL_SPECIALS) {
        Cow::Owned(quoted(label))
    } else {
        Cow::Borrowed(label)
    }
}

fn subgraph_title(title: &str) -> Cow<'_, str> {
    if title.is_empty() || title.trim() != title || title.contains('"') {
        Cow::Owned(quoted(title))
    } else {
        Cow::Borrowed(title)
    }
}

/// One line per link, or per chain of links when `compact_links` is set.
fn write_links(w: &mut Writer<'_>, links: &[FlowLink]) {
    let compact = w.options().compact_links();
    let mut lines: Vec<(String, &str)> = Vec::new();
    for link in links {
        let op = operator(link);
        let chains = compact && lines.last().is_some_and(|(_, last)| *last == link.source);
        match lines.last_mut() {
            Some((text, last)) if chains => {
                text.push_str(&format!(" {op} {}", link.target));
                *last = link.target.as_str();
            }
            _ => lines.push((
                format!("{} {op} {}", link.source, link.target),
                link.target.as_str(),
            )),
        }
    }
    for (text, _) in lines {
        w.line(text);
    }
}

/// The link operator with its `|label|`, for example `<-.->|maybe|`.
fn operator(link: &FlowLink) -> String {
    let length = link.length.max(1);
    let mut op = String::new();
    if link.stroke != LinkStroke::Invisible {
        op.push_str(match link.start {
            ArrowHead::None => "",
            ArrowHead::Arrow => "<",
            ArrowHead::Circle => "o",
            ArrowHead::Cross => "x",
        });
    }
    let end = match link.end {
        ArrowHead::None => "",
        ArrowHead::Arrow => ">",
        ArrowHead::Circle => "o",
        ArrowHead::Cross => "x",
    };
    match link.stroke {
        LinkStroke::Normal | LinkStroke::Thick => {
            let line = if link.stroke == LinkStroke::Thick { "=" } else { "-" };
            let count = if end.is_empty() { length + 2 } else { length + 1 };
            op.push_str(&line.repeat(count));
            op.push_str(end);
        }
        LinkStroke::Dotted => {
            op.push('-');
            op.push_str(&".".repeat(length));
            op.push('-');
            op.push_str(end);
        }
        LinkStroke::Invisible => op.push_str(&"~".repeat(length + 2)),
    }

    if let Some(label) = &link.label {
        op.push('|');
        if label.trim() != label || label.contains(['|', '"']) {
            op.push_str(&quoted(label));
        } else {
            op.push_str(label);
        }
        op.push('|');
    }
    op
}
