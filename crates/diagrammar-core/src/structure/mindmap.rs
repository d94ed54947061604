//! Mind map structure (`mindmap`).

use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed mind map: a single rooted tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mindmap {
    pub meta: Metadata,
    pub root: Option<MindmapNode>,
}

impl Mindmap {
    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        fn count(node: &MindmapNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.root.as_ref().map_or(0, count)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

/// Node shapes of a mind map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MindmapShape {
    /// Plain text, no delimiters.
    #[default]
    Default,
    /// `[text]`
    Square,
    /// `(text)`
    Rounded,
    /// `((text))`
    Circle,
    /// `))text((`
    Bang,
    /// `)text(`
    Cloud,
    /// `{{text}}`
    Hexagon,
}

impl MindmapShape {
    /// Longer openers first.
    pub const DELIMITED: [MindmapShape; 6] = [
        MindmapShape::Circle,
        MindmapShape::Bang,
        MindmapShape::Hexagon,
        MindmapShape::Square,
        MindmapShape::Rounded,
        MindmapShape::Cloud,
    ];

    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            MindmapShape::Default => ("", ""),
            MindmapShape::Square => ("[", "]"),
            MindmapShape::Rounded => ("(", ")"),
            MindmapShape::Circle => ("((", "))"),
            MindmapShape::Bang => ("))", "(("),
            MindmapShape::Cloud => (")", "("),
            MindmapShape::Hexagon => ("{{", "}}"),
        }
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapNode {
    /// Id written before a delimited shape; plain nodes have none.
    pub id: Option<String>,
    pub label: String,
    pub shape: MindmapShape,
    /// `::icon(fa fa-book)`
    pub icon: Option<String>,
    /// `:::urgent large`
    pub classes: Vec<String>,
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            shape: MindmapShape::Default,
            icon: None,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }
}
