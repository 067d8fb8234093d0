//! Serialization views for the Faculty → Student relationship.
//!
//! # Invariants
//! - Expansion is one-directional: `FacultyDetail` embeds its students as
//!   `FacultyMember`, which has no faculty field, so output never cycles.

use crate::model::faculty::Faculty;
use crate::model::student::{Student, StudentId};
use serde::{Deserialize, Serialize};

/// A student as listed under its faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
}

/// Faculty attributes plus its on-demand student list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyDetail {
    #[serde(flatten)]
    pub faculty: Faculty,
    pub students: Vec<FacultyMember>,
}

impl FacultyDetail {
    /// Builds a detail view from a faculty and the students referencing it.
    ///
    /// Unsaved students (no id) cannot be members and are skipped.
    pub fn new(faculty: Faculty, students: Vec<Student>) -> Self {
        let students = students
            .into_iter()
            .filter_map(|student| {
                student.id.map(|id| FacultyMember {
                    id,
                    name: student.name,
                    age: student.age,
                })
            })
            .collect();
        Self { faculty, students }
    }
}
