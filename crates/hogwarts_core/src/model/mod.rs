//! Directory domain model.
//!
//! # Responsibility
//! - Define the Faculty and Student records shared by repositories and
//!   services.
//! - Define serialization views for the Faculty → Student relationship.
//!
//! # Invariants
//! - Records reference each other by id only; there is no object graph.
//! - A Faculty's student list is derived from `Student::faculty_id` and is
//!   never stored on the Faculty record.

pub mod faculty;
pub mod student;
pub mod view;
