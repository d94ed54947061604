//! Flowchart structure (`flowchart` / `graph`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    meta::Metadata,
    structure::{ClassDef, Direction},
};

/// A parsed or built flowchart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flowchart {
    pub meta: Metadata,
    pub direction: Direction,
    /// Every node in the chart, including subgraph members, keyed by id.
    pub nodes: IndexMap<String, FlowNode>,
    pub links: Vec<FlowLink>,
    pub subgraphs: Vec<Subgraph>,
    pub class_defs: IndexMap<String, ClassDef>,
    pub styles: Vec<NodeStyle>,
    pub link_styles: Vec<LinkStyle>,
}

impl Flowchart {
    /// Empty flowchart with the given direction.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Returns `true` if `id` is a member of any subgraph, at any depth.
    pub fn is_subgraph_member(&self, id: &str) -> bool {
        self.subgraphs.iter().any(|sg| sg.contains(id))
    }
}

/// Node shapes, named after the bracket pair that produces them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeShape {
    /// `id[text]`
    #[default]
    Rect,
    /// `id(text)`
    Round,
    /// `id([text])`
    Stadium,
    /// `id[[text]]`
    Subroutine,
    /// `id[(text)]`
    Cylinder,
    /// `id((text))`
    Circle,
    /// `id(((text)))`
    DoubleCircle,
    /// `id>text]`
    Asymmetric,
    /// `id{text}`
    Rhombus,
    /// `id{{text}}`
    Hexagon,
    /// `id[/text/]`
    Parallelogram,
    /// `id[\text\]`
    ParallelogramAlt,
    /// `id[/text\]`
    Trapezoid,
    /// `id[\text/]`
    TrapezoidAlt,
}

impl NodeShape {
    /// Writing order matters to the parser: longer openers must be tried first.
    pub const ALL: [NodeShape; 14] = [
        NodeShape::DoubleCircle,
        NodeShape::Circle,
        NodeShape::Stadium,
        NodeShape::Round,
        NodeShape::Subroutine,
        NodeShape::Cylinder,
        NodeShape::Parallelogram,
        NodeShape::ParallelogramAlt,
        NodeShape::Trapezoid,
        NodeShape::TrapezoidAlt,
        NodeShape::Rect,
        NodeShape::Hexagon,
        NodeShape::Rhombus,
        NodeShape::Asymmetric,
    ];

    /// Opening and closing delimiters of the shape.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rect => ("[", "]"),
            NodeShape::Round => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Cylinder => ("[(", ")]"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::DoubleCircle => ("(((", ")))"),
            NodeShape::Asymmetric => (">", "]"),
            NodeShape::Rhombus => ("{", "}"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Parallelogram => ("[/", "/]"),
            NodeShape::ParallelogramAlt => ("[\\", "\\]"),
            NodeShape::Trapezoid => ("[/", "\\]"),
            NodeShape::TrapezoidAlt => ("[\\", "/]"),
        }
    }
}

/// Statement keywords that cannot be node ids.
pub const RESERVED_IDS: [&str; 9] = [
    "end",
    "subgraph",
    "direction",
    "class",
    "classDef",
    "style",
    "linkStyle",
    "accTitle",
    "accDescr",
];

/// Whether `id` is a statement keyword.
pub fn is_reserved_id(id: &str) -> bool {
    RESERVED_IDS.contains(&id)
}

/// A flowchart node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    /// Display text; a bare `id` declaration uses the id itself.
    pub label: String,
    pub shape: NodeShape,
    /// Style classes assigned with `:::name` or `class id name`.
    pub classes: Vec<String>,
}

impl FlowNode {
    /// A rectangle labelled with its own id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            shape: NodeShape::Rect,
            classes: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Line style of a link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStroke {
    /// `--`
    #[default]
    Normal,
    /// `==`
    Thick,
    /// `-.-`
    Dotted,
    /// `~~~`
    Invisible,
}

/// Marker drawn at one end of a link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowHead {
    #[default]
    None,
    /// `>` (or `<` at the start)
    Arrow,
    /// `o`
    Circle,
    /// `x`
    Cross,
}

/// A link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub stroke: LinkStroke,
    pub start: ArrowHead,
    pub end: ArrowHead,
    pub label: Option<String>,
    /// Rank span of the link; `1` is the shortest (`-->`), each extra stroke character adds one.
    pub length: usize,
}

impl FlowLink {
    /// A plain arrow `source --> target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            stroke: LinkStroke::Normal,
            start: ArrowHead::None,
            end: ArrowHead::Arrow,
            label: None,
            length: 1,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, stroke: LinkStroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_heads(mut self, start: ArrowHead, end: ArrowHead) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }
}

/// A `subgraph` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgraph {
    pub id: String,
    pub title: Option<String>,
    pub direction: Option<Direction>,
    /// Ids of the nodes first mentioned inside this subgraph, in mention order.
    pub nodes: Vec<String>,
    pub subgraphs: Vec<Subgraph>,
}

impl Subgraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            direction: None,
            nodes: Vec::new(),
            subgraphs: Vec::new(),
        }
    }

    /// Returns `true` if `id` is a member of this subgraph or of a nested one.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n == id) || self.subgraphs.iter().any(|sg| sg.contains(id))
    }
}

/// A `style id props` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub node: String,
    pub properties: Vec<String>,
}

/// Which links a `linkStyle` statement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkSelector {
    Default,
    Indices(Vec<usize>),
}

/// A `linkStyle` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStyle {
    pub selector: LinkSelector,
    pub properties: Vec<String>,
}
