//! User journey structure (`journey`).

use serde::{Deserialize, Serialize};

use crate::meta::Metadata;

/// A parsed user journey.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub meta: Metadata,
    /// Tasks written before the first `section`.
    pub tasks: Vec<Task>,
    pub sections: Vec<JourneySection>,
}

/// `section name` and its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneySection {
    pub name: String,
    pub tasks: Vec<Task>,
}

/// `Make tea: 5: Me, Cat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub score: f64,
    pub actors: Vec<String>,
}
