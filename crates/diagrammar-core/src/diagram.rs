//! The tagged union over every dialect structure.

use serde::{Deserialize, Serialize};

use crate::{
    dialect::DialectTag,
    meta::Metadata,
    structure::{
        class::ClassDiagram, er::ErDiagram, flowchart::Flowchart, journey::Journey,
        mindmap::Mindmap, pie::PieChart, quadrant::QuadrantChart, sankey::SankeyDiagram,
        sequence::SequenceDiagram, state::StateDiagram, timeline::Timeline, xychart::XyChart,
    },
};

/// A parsed or built diagram of any supported dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dialect", rename_all = "snake_case")]
pub enum Diagram {
    Flowchart(Flowchart),
    Class(ClassDiagram),
    Sequence(SequenceDiagram),
    State(StateDiagram),
    Pie(PieChart),
    Er(ErDiagram),
    Mindmap(Mindmap),
    Quadrant(QuadrantChart),
    Sankey(SankeyDiagram),
    Timeline(Timeline),
    Journey(Journey),
    XyChart(XyChart),
}

impl Diagram {
    /// The dialect this diagram belongs to.
    pub fn tag(&self) -> DialectTag {
        match self {
            Diagram::Flowchart(_) => DialectTag::Flowchart,
            Diagram::Class(_) => DialectTag::Class,
            Diagram::Sequence(_) => DialectTag::Sequence,
            Diagram::State(_) => DialectTag::State,
            Diagram::Pie(_) => DialectTag::Pie,
            Diagram::Er(_) => DialectTag::Er,
            Diagram::Mindmap(_) => DialectTag::Mindmap,
            Diagram::Quadrant(_) => DialectTag::Quadrant,
            Diagram::Sankey(_) => DialectTag::Sankey,
            Diagram::Timeline(_) => DialectTag::Timeline,
            Diagram::Journey(_) => DialectTag::Journey,
            Diagram::XyChart(_) => DialectTag::XyChart,
        }
    }

    /// Title and accessibility metadata of the diagram.
    pub fn meta(&self) -> &Metadata {
        match self {
            Diagram::Flowchart(d) => &d.meta,
            Diagram::Class(d) => &d.meta,
            Diagram::Sequence(d) => &d.meta,
            Diagram::State(d) => &d.meta,
            Diagram::Pie(d) => &d.meta,
            Diagram::Er(d) => &d.meta,
            Diagram::Mindmap(d) => &d.meta,
            Diagram::Quadrant(d) => &d.meta,
            Diagram::Sankey(d) => &d.meta,
            Diagram::Timeline(d) => &d.meta,
            Diagram::Journey(d) => &d.meta,
            Diagram::XyChart(d) => &d.meta,
        }
    }
}

macro_rules! impl_from_structure {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Diagram {
                fn from(value: $ty) -> Self {
                    Diagram::$variant(value)
                }
            }
        )*
    };
}

impl_from_structure!(
    Flowchart(Flowchart),
    Class(ClassDiagram),
    Sequence(SequenceDiagram),
    State(StateDiagram),
    Pie(PieChart),
    Er(ErDiagram),
    Mindmap(Mindmap),
    Quadrant(QuadrantChart),
    Sankey(SankeyDiagram),
    Timeline(Timeline),
    Journey(Journey),
    XyChart(XyChart),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_tag_matches_variant() {
        let diagram = Diagram::from(PieChart::default());
        assert_eq!(diagram.tag(), DialectTag::Pie);
        assert!(diagram.meta().is_empty());
    }

    #[test]
    fn test_diagram_is_send_sync() {
        assert_send_sync::<Diagram>();
    }
}
