//! Optional title and accessibility metadata carried by every dialect.

use serde::{Deserialize, Serialize};

/// Title and accessibility text.
///
/// Every field defaults to `None` and renderers omit absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Diagram title.
    pub title: Option<String>,
    /// Accessible title (`accTitle:`).
    pub acc_title: Option<String>,
    /// Accessible description (`accDescr:`).
    pub acc_descr: Option<String>,
}

impl Metadata {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.acc_title.is_none() && self.acc_descr.is_none()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_acc_title(mut self, acc_title: impl Into<String>) -> Self {
        self.acc_title = Some(acc_title.into());
        self
    }

    pub fn with_acc_descr(mut self, acc_descr: impl Into<String>) -> Self {
        self.acc_descr = Some(acc_descr.into());
        self
    }
}
