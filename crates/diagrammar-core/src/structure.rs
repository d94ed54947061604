//! Structure model types, one module per dialect.
//!
//! # Conventions
//!
//! - Declared entities live in an [`IndexMap`](indexmap::IndexMap) keyed by
//!   identifier; insertion order is the declaration order renderers emit.
//! - Relations are a `Vec` of records referencing entities by identifier.
//!   Nothing guarantees an endpoint was declared: parsers keep dangling
//!   references verbatim and only the builders check them.
//! - Every structure is a plain value: once produced it is never mutated by
//!   renderers or builders.

pub mod class;
pub mod er;
pub mod flowchart;
pub mod journey;
pub mod mindmap;
pub mod pie;
pub mod quadrant;
pub mod sankey;
pub mod sequence;
pub mod state;
pub mod timeline;
pub mod xychart;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Layout direction shared by flowchart, class and state diagrams.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `TB` (also accepted as `TD`)
    #[default]
    TopToBottom,
    /// `BT`
    BottomToTop,
    /// `LR`
    LeftToRight,
    /// `RL`
    RightToLeft,
}

impl Direction {
    /// The canonical two-letter code.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::BottomToTop => "BT",
            Direction::LeftToRight => "LR",
            Direction::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TopToBottom),
            "BT" => Ok(Direction::BottomToTop),
            "LR" => Ok(Direction::LeftToRight),
            "RL" => Ok(Direction::RightToLeft),
            _ => Err("Unsupported direction"),
        }
    }
}

/// A named style class (`classDef name fill:#f9f,stroke:#333`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    name: String,
    styles: Vec<String>,
}

impl ClassDef {
    /// Create a class definition from its name and its `key:value` properties.
    pub fn new<I, S>(name: impl Into<String>, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            styles: styles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_accepts_td_alias() {
        assert_eq!("TD".parse::<Direction>(), Ok(Direction::TopToBottom));
        assert_eq!("lr".parse::<Direction>(), Ok(Direction::LeftToRight));
        assert!("XY".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_default_is_top_to_bottom() {
        assert_eq!(Direction::default().as_str(), "TB");
    }
}
