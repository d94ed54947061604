//! The closed set of supported diagram dialects.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Discriminator identifying one diagram dialect.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectTag {
    Flowchart,
    Class,
    Sequence,
    State,
    Pie,
    Er,
    Mindmap,
    Quadrant,
    Sankey,
    Timeline,
    Journey,
    XyChart,
}

impl DialectTag {
    /// Every dialect, in detection order.
    pub const ALL: [DialectTag; 12] = [
        DialectTag::Flowchart,
        DialectTag::Class,
        DialectTag::Sequence,
        DialectTag::State,
        DialectTag::Pie,
        DialectTag::Er,
        DialectTag::Mindmap,
        DialectTag::Quadrant,
        DialectTag::Sankey,
        DialectTag::Timeline,
        DialectTag::Journey,
        DialectTag::XyChart,
    ];

    /// Header keywords accepted for this dialect, longest first.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            DialectTag::Flowchart => &["flowchart", "graph"],
            DialectTag::Class => &["classDiagram-v2", "classDiagram"],
            DialectTag::Sequence => &["sequenceDiagram"],
            DialectTag::State => &["stateDiagram-v2", "stateDiagram"],
            DialectTag::Pie => &["pie"],
            DialectTag::Er => &["erDiagram"],
            DialectTag::Mindmap => &["mindmap"],
            DialectTag::Quadrant => &["quadrantChart"],
            DialectTag::Sankey => &["sankey-beta", "sankey"],
            DialectTag::Timeline => &["timeline"],
            DialectTag::Journey => &["journey"],
            DialectTag::XyChart => &["xychart-beta", "xychart"],
        }
    }

    /// The keyword renderers write on the header line.
    pub fn canonical_keyword(self) -> &'static str {
        match self {
            DialectTag::Flowchart => "flowchart",
            DialectTag::Class => "classDiagram",
            DialectTag::Sequence => "sequenceDiagram",
            DialectTag::State => "stateDiagram-v2",
            DialectTag::Pie => "pie",
            DialectTag::Er => "erDiagram",
            DialectTag::Mindmap => "mindmap",
            DialectTag::Quadrant => "quadrantChart",
            DialectTag::Sankey => "sankey-beta",
            DialectTag::Timeline => "timeline",
            DialectTag::Journey => "journey",
            DialectTag::XyChart => "xychart-beta",
        }
    }

    /// Returns `true` if the dialect has a `title` statement of its own.
    ///
    /// Dialects without one carry their title in a front-matter block.
    pub fn has_native_title(self) -> bool {
        matches!(
            self,
            DialectTag::Sequence
                | DialectTag::Pie
                | DialectTag::Quadrant
                | DialectTag::Timeline
                | DialectTag::Journey
                | DialectTag::XyChart
        )
    }

    /// Returns `true` if the dialect's grammar engine needs asynchronous setup.
    pub fn is_async(self) -> bool {
        matches!(self, DialectTag::Pie)
    }

    /// Configuration name of the dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            DialectTag::Flowchart => "flowchart",
            DialectTag::Class => "class",
            DialectTag::Sequence => "sequence",
            DialectTag::State => "state",
            DialectTag::Pie => "pie",
            DialectTag::Er => "er",
            DialectTag::Mindmap => "mindmap",
            DialectTag::Quadrant => "quadrant",
            DialectTag::Sankey => "sankey",
            DialectTag::Timeline => "timeline",
            DialectTag::Journey => "journey",
            DialectTag::XyChart => "xy_chart",
        }
    }
}

impl fmt::Display for DialectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectTag {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DialectTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or("Unsupported dialect")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_tag() {
        for tag in DialectTag::ALL {
            assert_eq!(tag.as_str().parse::<DialectTag>(), Ok(tag));
        }
        assert!("gantt".parse::<DialectTag>().is_err());
    }

    #[test]
    fn test_canonical_keyword_is_accepted() {
        for tag in DialectTag::ALL {
            assert!(tag.keywords().contains(&tag.canonical_keyword()));
        }
    }

    #[test]
    fn test_only_pie_is_async() {
        let async_tags: Vec<_> = DialectTag::ALL.into_iter().filter(|t| t.is_async()).collect();
        assert_eq!(async_tags, vec![DialectTag::Pie]);
    }
}
