//! XY chart structure (`xychart-beta`).

use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed XY chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XyChart {
    pub meta: Metadata,
    pub orientation: Orientation,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
}

/// `xychart-beta` or `xychart-beta horizontal`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// An axis title plus its scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Option<String>,
    pub kind: AxisKind,
}

impl Axis {
    /// Returns `true` if the axis statement would carry no information.
    pub fn is_unset(&self) -> bool {
        self.title.is_none() && self.kind == AxisKind::None
    }
}

/// Scale of an axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AxisKind {
    /// Derived from the data.
    #[default]
    None,
    /// `[jan, feb, mar]`
    Categories(Vec<String>),
    /// `min --> max`
    Range { min: f64, max: f64 },
}

/// Series plot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Bar,
    Line,
}

impl SeriesKind {
    pub fn keyword(self) -> &'static str {
        match self {
            SeriesKind::Bar => "bar",
            SeriesKind::Line => "line",
        }
    }
}

/// `bar "title" [1, 2, 3]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub title: Option<String>,
    pub values: Vec<f64>,
}
