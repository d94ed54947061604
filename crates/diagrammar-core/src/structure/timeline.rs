//! Timeline structure (`timeline`).

use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub meta: Metadata,
    /// Periods written before the first `section`.
    pub periods: Vec<Period>,
    pub sections: Vec<TimelineSection>,
}

/// `section name` and the periods that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSection {
    pub name: String,
    pub periods: Vec<Period>,
}

/// `2004 : Facebook : Google`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub events: Vec<String>,
}
