//! Quadrant chart structure (`quadrantChart`).

use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed quadrant chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadrantChart {
    pub meta: Metadata,
    pub x_axis: AxisLabels,
    pub y_axis: AxisLabels,
    /// Labels of `quadrant-1` through `quadrant-4`.
    pub quadrants: [Option<String>; 4],
    pub points: Vec<QuadrantPoint>,
}

/// Labels at both ends of an axis.
///
/// For the x axis `start` is the left label; for the y axis it is the bottom one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `Name:::class: [x, y]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantPoint {
    pub name: String,
    pub class: Option<String>,
    pub x: f64,
    pub y: f64,
}
