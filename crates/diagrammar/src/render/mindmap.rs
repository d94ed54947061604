//! Canonical mind map text.
//!
//! The root sits one indentation unit deep and every child one unit deeper
//! than its parent. Icons and classes follow their node on their own lines.

use std::borrow::Cow;

use diagrammar_core::structure::mindmap::{Mindmap, MindmapNode, MindmapShape};

use super::writer::Writer;
use crate::config::RenderOptions;

/// Characters that make delimited content ambiguous at either end.
const DELIMITER_CHARS: [char; 6] = ['(', ')', '[', ']', '{', '}'];

/// Render a mind map.
pub fn mindmap(mindmap: &Mindmap, options: &RenderOptions) -> String {
    let mut w = Writer::new(options);
    w.front_matter(&mindmap.meta);
    w.header("mindmap");
    w.accessibility(&mindmap.meta);
    if let Some(root) = &mindmap.root {
        write_node(&mut w, root);
    }
    w.finish()
}

fn write_node(w: &mut Writer<'_>, node: &MindmapNode) {
    w.line(node_text(node));
    w.nested(|w| {
        if let Some(icon) = &node.icon {
            w.line(format!("::icon({icon})"));
        }
        if !node.classes.is_empty() {
            w.line(format!(":::{}", node.classes.join(" ")));
        }
        for child in &node.children {
            write_node(w, child);
        }
    });
}

fn node_text(node: &MindmapNode) -> Cow<'_, str> {
    if node.shape == MindmapShape::Default {
        if node.label.trim().is_empty() {
            return Cow::Borrowed("\"\"");
        }
        return Cow::Borrowed(node.label.as_str());
    }
    let (open, close) = node.shape.delimiters();
    let label = &node.label;
    let needs_quotes = label.is_empty()
        || label.starts_with(DELIMITER_CHARS)
        || label.ends_with(DELIMITER_CHARS);
    let id = node.id.as_deref().unwrap_or("");
    if needs_quotes {
        Cow::Owned(format!("{id}{open}\"{label}\"{close}"))
    } else {
        Cow::Owned(format!("{id}{open}{label}{close}"))
    }
}
