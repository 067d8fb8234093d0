//! Faculty directory service.
//!
//! # Responsibility
//! - Provide faculty CRUD and search entry points.
//! - Assemble the faculty detail view with its student list on demand.
//!
//! # Invariants
//! - `update_faculty` is replace-style and never creates a record.
//! - `delete_faculty` returns the record as it was just before deletion.
//! - Log lines carry ids and counts only.

use crate::model::faculty::{Faculty, FacultyId};
use crate::model::student::Student;
use crate::model::view::FacultyDetail;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::faculty_repo::FacultyRepository;
use log::{debug, info};

/// Use-case service over a faculty repository.
pub struct FacultyService<R: FacultyRepository> {
    repo: R,
}

impl<R: FacultyRepository> FacultyService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new faculty and returns it with its assigned id.
    pub fn create_faculty(&self, faculty: &Faculty) -> RepoResult<Faculty> {
        let created = self.repo.save(faculty)?;
        info!(
            "event=faculty_create module=service status=ok id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    pub fn get_faculty(&self, id: FacultyId) -> RepoResult<Option<Faculty>> {
        self.repo.find_by_id(id)
    }

    /// Loads a faculty together with its students.
    pub fn get_faculty_detail(&self, id: FacultyId) -> RepoResult<Option<FacultyDetail>> {
        self.repo
            .find_by_id(id)?
            .map(|faculty| self.detail_of(faculty))
            .transpose()
    }

    /// Attaches the current student list to an already loaded faculty.
    ///
    /// An unsaved faculty has no students.
    pub fn detail_of(&self, faculty: Faculty) -> RepoResult<FacultyDetail> {
        let students = match faculty.id {
            Some(id) => self.repo.find_students(id)?,
            None => Vec::new(),
        };
        Ok(FacultyDetail::new(faculty, students))
    }

    /// `detail_of` for each faculty, keeping order.
    pub fn details_of(&self, faculties: Vec<Faculty>) -> RepoResult<Vec<FacultyDetail>> {
        faculties
            .into_iter()
            .map(|faculty| self.detail_of(faculty))
            .collect()
    }

    pub fn get_all_faculties(&self) -> RepoResult<Vec<Faculty>> {
        self.repo.find_all()
    }

    /// Replaces every field of an existing faculty.
    ///
    /// # Contract
    /// - `faculty.id` must be set; `RepoError::MissingId` otherwise.
    /// - Returns `Ok(None)` without writing when the id is unknown.
    /// - The write is a plain `UPDATE`, so a record deleted between the
    ///   existence check and the write stays deleted and `Ok(None)` is
    ///   returned.
    pub fn update_faculty(&self, faculty: &Faculty) -> RepoResult<Option<Faculty>> {
        let id = faculty.id.ok_or(RepoError::MissingId("faculty"))?;
        if !self.repo.exists_by_id(id)? {
            info!("event=faculty_update module=service status=not_found id={id}");
            return Ok(None);
        }

        let updated = self.repo.update(faculty)?;
        match updated {
            Some(_) => info!("event=faculty_update module=service status=ok id={id}"),
            None => info!("event=faculty_update module=service status=not_found id={id}"),
        }
        Ok(updated)
    }

    /// Deletes a faculty and returns its last stored state.
    ///
    /// # Errors
    /// - `RepoError::IntegrityViolation` when students still reference it;
    ///   the faculty is kept.
    pub fn delete_faculty(&self, id: FacultyId) -> RepoResult<Option<Faculty>> {
        let Some(existing) = self.repo.find_by_id(id)? else {
            info!("event=faculty_delete module=service status=not_found id={id}");
            return Ok(None);
        };

        self.repo.delete_by_id(id)?;
        info!("event=faculty_delete module=service status=ok id={id}");
        Ok(Some(existing))
    }

    /// Case-insensitive exact match on color.
    pub fn get_faculties_by_color(&self, color: &str) -> RepoResult<Vec<Faculty>> {
        let faculties = self.repo.find_by_color_case_insensitive(color)?;
        debug!(
            "event=faculty_by_color module=service status=ok count={}",
            faculties.len()
        );
        Ok(faculties)
    }

    /// Case-insensitive exact match of one term against name OR color.
    pub fn search_by_name_or_color(&self, text: &str) -> RepoResult<Vec<Faculty>> {
        let faculties = self.repo.find_by_name_or_color_case_insensitive(text)?;
        debug!(
            "event=faculty_search module=service status=ok count={}",
            faculties.len()
        );
        Ok(faculties)
    }

    /// Students of an existing faculty; `Ok(None)` when the faculty is unknown.
    pub fn get_faculty_students(&self, id: FacultyId) -> RepoResult<Option<Vec<Student>>> {
        if !self.repo.exists_by_id(id)? {
            return Ok(None);
        }
        self.repo.find_students(id).map(Some)
    }
}
