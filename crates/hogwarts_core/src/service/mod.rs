//! Directory use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the directory operations callers use.
//! - Keep adapters decoupled from storage details.
//!
//! # Invariants
//! - Services hold nothing but their repository; every call is independent.
//! - Updates and deletes check existence before writing and report absence
//!   as `Ok(None)`.

pub mod faculty_service;
pub mod student_service;
