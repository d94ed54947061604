//! Mind map parser (`mindmap`).
//!
//! The tree is given by indentation: a line indented deeper than the one
//! before it is a child of that line; otherwise it is a sibling of the
//! nearest shallower-or-equal ancestor.

use diagrammar_core::{
    DialectTag,
    structure::mindmap::{Mindmap, MindmapNode, MindmapShape},
    text::is_ident_char,
};
use log::debug;

use crate::{
    common,
    error::{ErrorCode, ParseError},
    source::{self, Line},
};

/// Parse mind map text.
pub fn parse(text: &str) -> Result<Mindmap, ParseError> {
    let source = source::prepare(text, DialectTag::Mindmap)?;
    let mut acc = Accumulator {
        mindmap: Mindmap {
            meta: source.metadata(),
            root: None,
        },
        stack: Vec::new(),
    };
    for line in &source.body {
        acc.statement(line)?;
    }
    Ok(acc.finish())
}

struct Accumulator {
    mindmap: Mindmap,
    /// Nodes on the path from the root to the last line, with their indent.
    stack: Vec<(usize, MindmapNode)>,
}

impl Accumulator {
    fn statement(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        if common::metadata_statement(line, &mut self.mindmap.meta) {
            return Ok(());
        }
        if let Some(classes) = line.text.strip_prefix(":::") {
            let node = self.decorated(line)?;
            node.classes
                .extend(classes.split_whitespace().map(str::to_string));
            return Ok(());
        }
        if let Some(icon) = line
            .text
            .strip_prefix("::icon(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let icon = icon.trim().to_string();
            self.decorated(line)?.icon = Some(icon);
            return Ok(());
        }

        if line.indent.contains(' ') && line.indent.contains('\t') {
            return Err(ParseError::new(
                ErrorCode::E301,
                line.number,
                1,
                "indentation mixes tabs and spaces",
            ));
        }
        let indent = line.indent_width();
        self.unwind(indent);
        if self.stack.is_empty() && self.mindmap.root.is_some() {
            return Err(line.error(ErrorCode::E300, 0, "a mind map has a single root"));
        }
        self.stack.push((indent, node(line.text)));
        Ok(())
    }

    /// The node a decoration line applies to.
    fn decorated(&mut self, line: &Line<'_>) -> Result<&mut MindmapNode, ParseError> {
        match self.stack.last_mut() {
            Some((_, node)) => Ok(node),
            None => Err(line.unexpected()),
        }
    }

    /// Close every open node indented at least as deep as `indent`.
    fn unwind(&mut self, indent: usize) {
        while self.stack.last().is_some_and(|(depth, _)| *depth >= indent) {
            self.pop();
        }
    }

    fn pop(&mut self) {
        let Some((_, node)) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => self.mindmap.root = Some(node),
        }
    }

    fn finish(mut self) -> Mindmap {
        while !self.stack.is_empty() {
            self.pop();
        }
        debug!(nodes = self.mindmap.len(); "Parsed mind map");
        self.mindmap
    }
}

/// A node line: `text`, or `id` followed by a delimited shape.
fn node(text: &str) -> MindmapNode {
    let prefix_len = text
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map_or(text.len(), |(i, _)| i);
    let (prefix, rest) = text.split_at(prefix_len);

    for shape in MindmapShape::DELIMITED {
        let (open, close) = shape.delimiters();
        let Some(content) = rest
            .strip_prefix(open)
            .and_then(|inner| inner.strip_suffix(close))
        else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        let mut node = MindmapNode::new(unquote(content));
        node.shape = shape;
        node.id = (!prefix.is_empty()).then(|| prefix.to_string());
        return node;
    }
    MindmapNode::new(text)
}

/// Strip surrounding quotes when the content has no inner quote.
fn unquote(content: &str) -> &str {
    match content
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) if !inner.contains('"') => inner,
        _ => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_from_indentation() {
        let mindmap = parse(
            "mindmap\n  root((Central))\n    Origins\n      Long history\n      Popularisation\n    Research\n    Tools\n",
        )
        .unwrap();
        let root = mindmap.root.as_ref().unwrap();
        assert_eq!(root.id.as_deref(), Some("root"));
        assert_eq!(root.label, "Central");
        assert_eq!(root.shape, MindmapShape::Circle);
        let labels: Vec<_> = root.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Origins", "Research", "Tools"]);
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(mindmap.len(), 6);
    }

    #[test]
    fn test_shapes() {
        let cases = [
            ("a[Square]", MindmapShape::Square, "Square"),
            ("b(Rounded)", MindmapShape::Rounded, "Rounded"),
            ("c((Circle))", MindmapShape::Circle, "Circle"),
            ("d))Bang((", MindmapShape::Bang, "Bang"),
            ("e)Cloud(", MindmapShape::Cloud, "Cloud"),
            ("f{{Hex}}", MindmapShape::Hexagon, "Hex"),
            ("[No id]", MindmapShape::Square, "No id"),
            ("g[\"quoted text\"]", MindmapShape::Square, "quoted text"),
            ("Tools (hammer)", MindmapShape::Default, "Tools (hammer)"),
            ("h[]", MindmapShape::Default, "h[]"),
        ];
        for (text, shape, label) in cases {
            let node = node(text);
            assert_eq!(node.shape, shape, "{text}");
            assert_eq!(node.label, label, "{text}");
        }
    }

    #[test]
    fn test_decorations_apply_to_previous_node() {
        let mindmap = parse(
            "mindmap\nRoot\n  Child\n    ::icon(fa fa-book)\n    :::urgent large\n",
        )
        .unwrap();
        let child = &mindmap.root.as_ref().unwrap().children[0];
        assert_eq!(child.icon.as_deref(), Some("fa fa-book"));
        assert_eq!(child.classes, vec!["urgent", "large"]);
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_second_root_is_rejected() {
        let err = parse("mindmap\n  One\n    Child\n  Two\n").unwrap_err();
        assert_eq!((err.code, err.line, err.column), (ErrorCode::E300, 4, 3));
    }

    #[test]
    fn test_mixed_indentation_is_rejected() {
        let err = parse("mindmap\nRoot\n \tChild\n").unwrap_err();
        assert_eq!((err.code, err.line), (ErrorCode::E301, 3));
    }

    #[test]
    fn test_empty_mindmap() {
        let mindmap = parse("mindmap\n").unwrap();
        assert!(mindmap.is_empty());
    }
}
