//! Flowchart builder.

use log::debug;
use thiserror::Error;

use diagrammar_core::structure::{
    ClassDef, Direction,
    flowchart::{
        FlowLink, FlowNode, Flowchart, LinkSelector, LinkStyle, NodeStyle, Subgraph,
        is_reserved_id,
    },
};

use crate::config::BuildOptions;

/// A reference a flowchart could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowValidationError {
    #[error("unknown node `{id}` referenced by {referenced_by}")]
    UnknownNode { id: String, referenced_by: String },

    #[error("undefined class `{id}` referenced by {referenced_by}")]
    UndefinedClass { id: String, referenced_by: String },

    #[error("`{id}` is a reserved word and cannot be a node id")]
    ReservedId { id: String },
}

/// Accumulates a [`Flowchart`].
#[derive(Debug, Clone)]
pub struct FlowBuilder {
    chart: Flowchart,
    /// `(node, class)` pairs applied at build time.
    assignments: Vec<(String, String)>,
}

impl FlowBuilder {
    pub fn new(direction: Direction) -> Self {
        Self {
            chart: Flowchart::new(direction),
            assignments: Vec::new(),
        }
    }

    metadata_setters!(chart);

    /// Declare a node. Declaring an id again replaces its record in place.
    pub fn node(mut self, node: FlowNode) -> Self {
        self.chart.nodes.insert(node.id.clone(), node);
        self
    }

    pub fn link(mut self, link: FlowLink) -> Self {
        self.chart.links.push(link);
        self
    }

    /// Open a subgraph; nodes declared in `scope` become its members.
    pub fn subgraph<F>(mut self, id: impl Into<String>, scope: F) -> Self
    where
        F: FnOnce(SubgraphBuilder) -> SubgraphBuilder,
    {
        let child = scope(SubgraphBuilder::new(id));
        for node in child.nodes {
            self.chart.nodes.insert(node.id.clone(), node);
        }
        self.chart.links.extend(child.links);
        self.chart.subgraphs.push(child.subgraph);
        self
    }

    pub fn class_def<I, S>(mut self, name: impl Into<String>, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let def = ClassDef::new(name, styles);
        self.chart.class_defs.insert(def.name().to_string(), def);
        self
    }

    /// Assign `class` to the node `id`, which may be declared later.
    pub fn class(mut self, id: impl Into<String>, class: impl Into<String>) -> Self {
        self.assignments.push((id.into(), class.into()));
        self
    }

    pub fn style<I, S>(mut self, node: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chart.styles.push(NodeStyle {
            node: node.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn link_style<I, S>(mut self, selector: LinkSelector, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chart.link_styles.push(LinkStyle {
            selector,
            properties: properties.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Produce the flowchart.
    ///
    /// # Errors
    ///
    /// With validation enabled, fails on the first link endpoint, class
    /// assignment or style naming an undeclared node, a node class without
    /// a `classDef`, or a node id that is a statement keyword such as `end`.
    /// Unchecked builds create nodes for unresolved class assignments.
    pub fn build(self, options: BuildOptions) -> Result<Flowchart, FlowValidationError> {
        let Self {
            mut chart,
            assignments,
        } = self;
        debug!(
            nodes = chart.nodes.len(),
            links = chart.links.len(),
            validate = options.validate();
            "Building flowchart"
        );

        for (id, class) in assignments {
            if options.validate() && !chart.nodes.contains_key(&id) {
                return Err(FlowValidationError::UnknownNode {
                    referenced_by: format!("class assignment `{class}`"),
                    id,
                });
            }
            chart
                .nodes
                .entry(id.clone())
                .or_insert_with(|| FlowNode::new(id))
                .classes
                .push(class);
        }

        if options.validate() {
            validate(&chart)?;
        }
        Ok(chart)
    }
}

fn validate(chart: &Flowchart) -> Result<(), FlowValidationError> {
    if let Some(id) = chart.nodes.keys().find(|id| is_reserved_id(id)) {
        return Err(FlowValidationError::ReservedId { id: id.clone() });
    }
    for link in &chart.links {
        let describe = || format!("link {} --> {}", link.source, link.target);
        require_node(chart, &link.source, &describe)?;
        require_node(chart, &link.target, &describe)?;
    }
    for node in chart.nodes.values() {
        if let Some(class) = node.classes.iter().find(|c| !chart.class_defs.contains_key(*c)) {
            return Err(FlowValidationError::UndefinedClass {
                id: class.clone(),
                referenced_by: format!("node {}", node.id),
            });
        }
    }
    for style in &chart.styles {
        require_node(chart, &style.node, || "a style statement".to_string())?;
    }
    Ok(())
}

fn require_node(
    chart: &Flowchart,
    id: &str,
    referenced_by: impl FnOnce() -> String,
) -> Result<(), FlowValidationError> {
    if chart.nodes.contains_key(id) {
        return Ok(());
    }
    Err(FlowValidationError::UnknownNode {
        id: id.to_string(),
        referenced_by: referenced_by(),
    })
}

/// Accumulates one subgraph inside a [`FlowBuilder`].
#[derive(Debug, Clone)]
pub struct SubgraphBuilder {
    subgraph: Subgraph,
    nodes: Vec<FlowNode>,
    links: Vec<FlowLink>,
}

impl SubgraphBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            subgraph: Subgraph::new(id),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.subgraph.title = Some(title.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.subgraph.direction = Some(direction);
        self
    }

    /// Declare a node and make it a member of this subgraph.
    pub fn node(mut self, node: FlowNode) -> Self {
        if !self.subgraph.nodes.contains(&node.id) {
            self.subgraph.nodes.push(node.id.clone());
        }
        self.nodes.push(node);
        self
    }

    pub fn link(mut self, link: FlowLink) -> Self {
        self.links.push(link);
        self
    }

    pub fn subgraph<F>(mut self, id: impl Into<String>, scope: F) -> Self
    where
        F: FnOnce(SubgraphBuilder) -> SubgraphBuilder,
    {
        let child = scope(SubgraphBuilder::new(id));
        self.nodes.extend(child.nodes);
        self.links.extend(child.links);
        self.subgraph.subgraphs.push(child.subgraph);
        self
    }
}
