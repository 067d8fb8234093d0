//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from the directory services.
//!
//! # Invariants
//! - Absence is an `Ok(None)` / empty result, never an error.
//! - Storage constraint failures surface as `RepoError::IntegrityViolation`.
//! - All filtering runs in SQL, not in memory.

pub mod error;
pub mod faculty_repo;
mod schema_check;
pub mod student_repo;
