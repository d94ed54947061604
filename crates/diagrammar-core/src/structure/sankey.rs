//! Sankey diagram structure (`sankey-beta`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed sankey diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyDiagram {
    pub meta: Metadata,
    /// Nodes in order of first appearance in a flow record.
    pub nodes: IndexMap<String, SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyDiagram {
    /// Append a flow, creating either endpoint that is not known yet.
    pub fn add_flow(&mut self, source: &str, target: &str, value: f64) {
        for id in [source, target] {
            self.nodes
                .entry(id.to_string())
                .or_insert_with(|| SankeyNode::new(id));
        }
        self.links.push(SankeyLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
        });
    }
}

/// A sankey node; its label defaults to its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub id: String,
    pub label: String,
}

impl SankeyNode {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }
}

/// One `source,target,value` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_flow_creates_nodes_once() {
        let mut diagram = SankeyDiagram::default();
        diagram.add_flow("A", "B", 1.0);
        diagram.add_flow("B", "C", 2.0);

        let ids: Vec<_> = diagram.nodes.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(diagram.nodes["B"].label, "B");
        assert_eq!(diagram.links.len(), 2);
    }
}
