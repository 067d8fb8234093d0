//! Faculty repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and case-insensitive lookups over `faculties` storage.
//! - Resolve the inverse Faculty → Student relationship on demand.
//!
//! # Invariants
//! - Case-insensitive matching compares `fold_case` of both operands, so it
//!   is exact equality after Unicode lower-casing, never a substring match.
//! - A faculty referenced by any student cannot be deleted.

use crate::db::FOLD_CASE_FN;
use crate::model::faculty::{Faculty, FacultyId};
use crate::model::student::Student;
use crate::repo::error::RepoResult;
use crate::repo::schema_check::{ensure_connection_ready, FACULTIES_TABLE, STUDENTS_TABLE};
use crate::repo::student_repo::query_students;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const FACULTY_SELECT_SQL: &str = "SELECT id, name, color FROM faculties";

/// Repository interface for faculty persistence.
pub trait FacultyRepository {
    fn find_by_id(&self, id: FacultyId) -> RepoResult<Option<Faculty>>;
    fn find_all(&self) -> RepoResult<Vec<Faculty>>;
    fn exists_by_id(&self, id: FacultyId) -> RepoResult<bool>;
    /// Inserts or replaces; returns the stored row including its id.
    fn save(&self, faculty: &Faculty) -> RepoResult<Faculty>;
    /// Overwrites an existing row; `Ok(None)` when `id` is unset or unknown.
    /// Never inserts.
    fn update(&self, faculty: &Faculty) -> RepoResult<Option<Faculty>>;
    /// Removes the row if present. Deleting an absent id is a no-op.
    fn delete_by_id(&self, id: FacultyId) -> RepoResult<()>;
    fn find_by_color_case_insensitive(&self, color: &str) -> RepoResult<Vec<Faculty>>;
    /// Matches `text` against name OR color; one row is returned at most once.
    fn find_by_name_or_color_case_insensitive(&self, text: &str) -> RepoResult<Vec<Faculty>>;
    /// Students whose `faculty_id` is `id`.
    fn find_students(&self, id: FacultyId) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed faculty repository.
pub struct SqliteFacultyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFacultyRepository<'conn> {
    /// Creates repository from a migrated connection.
    ///
    /// Checks the `students` table as well, since student lists are loaded
    /// through this repository.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[FACULTIES_TABLE, STUDENTS_TABLE])?;
        Ok(Self { conn })
    }

    fn query_faculties<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Faculty>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FACULTY_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
        let faculties = stmt
            .query_map(params, parse_faculty_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(faculties)
    }
}

impl FacultyRepository for SqliteFacultyRepository<'_> {
    fn find_by_id(&self, id: FacultyId) -> RepoResult<Option<Faculty>> {
        let faculty = self
            .conn
            .query_row(
                &format!("{FACULTY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_faculty_row,
            )
            .optional()?;
        Ok(faculty)
    }

    fn find_all(&self) -> RepoResult<Vec<Faculty>> {
        self.query_faculties("", [])
    }

    fn exists_by_id(&self, id: FacultyId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM faculties WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, faculty: &Faculty) -> RepoResult<Faculty> {
        let saved = self.conn.query_row(
            "INSERT INTO faculties (id, name, color)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                color = excluded.color
             RETURNING id, name, color;",
            params![faculty.id, faculty.name.as_str(), faculty.color.as_str()],
            parse_faculty_row,
        )?;
        Ok(saved)
    }

    fn update(&self, faculty: &Faculty) -> RepoResult<Option<Faculty>> {
        let Some(id) = faculty.id else {
            return Ok(None);
        };
        let updated = self
            .conn
            .query_row(
                "UPDATE faculties
                 SET name = ?2, color = ?3
                 WHERE id = ?1
                 RETURNING id, name, color;",
                params![id, faculty.name.as_str(), faculty.color.as_str()],
                parse_faculty_row,
            )
            .optional()?;
        Ok(updated)
    }

    fn delete_by_id(&self, id: FacultyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM faculties WHERE id = ?1;", [id])?;
        if changed == 0 {
            debug!("event=faculty_delete module=repo status=noop id={id}");
        }
        Ok(())
    }

    fn find_by_color_case_insensitive(&self, color: &str) -> RepoResult<Vec<Faculty>> {
        self.query_faculties(
            &format!("WHERE {FOLD_CASE_FN}(color) = {FOLD_CASE_FN}(?1)"),
            [color],
        )
    }

    fn find_by_name_or_color_case_insensitive(&self, text: &str) -> RepoResult<Vec<Faculty>> {
        self.query_faculties(
            &format!(
                "WHERE {FOLD_CASE_FN}(name) = {FOLD_CASE_FN}(?1)
                    OR {FOLD_CASE_FN}(color) = {FOLD_CASE_FN}(?1)"
            ),
            [text],
        )
    }

    fn find_students(&self, id: FacultyId) -> RepoResult<Vec<Student>> {
        query_students(self.conn, "WHERE faculty_id = ?1", [id])
    }
}

fn parse_faculty_row(row: &Row<'_>) -> rusqlite::Result<Faculty> {
    Ok(Faculty {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        color: row.get("color")?,
    })
}
