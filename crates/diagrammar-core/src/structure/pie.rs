//! Pie chart structure (`pie`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed pie chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub meta: Metadata,
    /// `pie showData`
    pub show_data: bool,
    /// Section values keyed by label; the first occurrence of a label wins.
    pub sections: IndexMap<String, f64>,
}

impl PieChart {
    /// Sum of every section value.
    pub fn total(&self) -> f64 {
        self.sections.values().sum()
    }
}
