//! Faculty domain model.

use serde::{Deserialize, Serialize};

/// Storage-assigned Faculty identifier.
pub type FacultyId = i64;

/// A school faculty ("house").
///
/// `id` is `None` until the record has been saved; storage assigns it and
/// it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    #[serde(default)]
    pub id: Option<FacultyId>,
    pub name: String,
    pub color: String,
}

impl Faculty {
    /// Creates an unsaved faculty.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Returns a copy of this payload bound to `id`.
    ///
    /// Adapters use this to attach a path-supplied id before an update.
    pub fn with_id(mut self, id: FacultyId) -> Self {
        self.id = Some(id);
        self
    }
}
