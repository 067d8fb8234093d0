//! Student directory service.
//!
//! # Invariants
//! - `update_student` is replace-style and never creates a record.
//! - Age ranges are inclusive and never reordered.

use crate::model::faculty::FacultyId;
use crate::model::student::{Student, StudentId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::student_repo::StudentRepository;
use log::info;

/// Use-case service over a student repository.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new student and returns it with its assigned id.
    ///
    /// Fails with `RepoError::IntegrityViolation` when `faculty_id` names an
    /// unknown faculty.
    pub fn create_student(&self, student: &Student) -> RepoResult<Student> {
        let created = self.repo.save(student)?;
        info!(
            "event=student_create module=service status=ok id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.find_by_id(id)
    }

    pub fn get_all_students(&self) -> RepoResult<Vec<Student>> {
        self.repo.find_all()
    }

    /// Replaces every field of an existing student.
    ///
    /// # Contract
    /// - `student.id` must be set; `RepoError::MissingId` otherwise.
    /// - Returns `Ok(None)` without writing when the id is unknown.
    /// - The write is a plain `UPDATE`, so a record deleted between the
    ///   existence check and the write stays deleted and `Ok(None)` is
    ///   returned.
    pub fn update_student(&self, student: &Student) -> RepoResult<Option<Student>> {
        let id = student.id.ok_or(RepoError::MissingId("student"))?;
        if !self.repo.exists_by_id(id)? {
            info!("event=student_update module=service status=not_found id={id}");
            return Ok(None);
        }

        let updated = self.repo.update(student)?;
        match updated {
            Some(_) => info!("event=student_update module=service status=ok id={id}"),
            None => info!("event=student_update module=service status=not_found id={id}"),
        }
        Ok(updated)
    }

    /// Deletes a student and returns its last stored state.
    pub fn delete_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let Some(existing) = self.repo.find_by_id(id)? else {
            info!("event=student_delete module=service status=not_found id={id}");
            return Ok(None);
        };

        self.repo.delete_by_id(id)?;
        info!("event=student_delete module=service status=ok id={id}");
        Ok(Some(existing))
    }

    pub fn get_students_by_age(&self, age: i32) -> RepoResult<Vec<Student>> {
        self.repo.find_by_age(age)
    }

    /// Students with `min <= age <= max`. `min > max` yields an empty list.
    pub fn get_students_by_age_between(&self, min: i32, max: i32) -> RepoResult<Vec<Student>> {
        self.repo.find_by_age_between(min, max)
    }

    pub fn get_students_by_faculty(&self, faculty_id: FacultyId) -> RepoResult<Vec<Student>> {
        self.repo.find_by_faculty_id(faculty_id)
    }
}
