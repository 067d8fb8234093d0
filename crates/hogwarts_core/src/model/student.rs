//! Student domain model.

use crate::model::faculty::FacultyId;
use serde::{Deserialize, Serialize};

/// Storage-assigned Student identifier.
pub type StudentId = i64;

/// A student, optionally enrolled in one faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// `None` until saved.
    #[serde(default)]
    pub id: Option<StudentId>,
    pub name: String,
    pub age: i32,
    /// Many-to-one reference. `None` means the student is unaffiliated.
    #[serde(default)]
    pub faculty_id: Option<FacultyId>,
}

impl Student {
    /// Creates an unsaved, unaffiliated student.
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            faculty_id: None,
        }
    }

    /// Sets the faculty reference.
    pub fn in_faculty(mut self, faculty_id: FacultyId) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    /// Returns a copy of this payload bound to `id`.
    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }
}
