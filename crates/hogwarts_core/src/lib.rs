//! Core domain logic for the Hogwarts faculty/student directory.
//! This crate owns storage, relationship rules and the directory services;
//! adapters only translate their inputs into these calls.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::faculty::{Faculty, FacultyId};
pub use model::student::{Student, StudentId};
pub use model::view::{FacultyDetail, FacultyMember};
pub use repo::error::{RepoError, RepoResult};
pub use repo::faculty_repo::{FacultyRepository, SqliteFacultyRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use service::faculty_service::FacultyService;
pub use service::student_service::StudentService;

/// Minimal health-check API for adapter wiring checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
