//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and age/faculty filters over `students` storage.
//!
//! # Invariants
//! - `save` is a single upsert: unset id inserts, set id replaces or inserts
//!   that id.
//! - `faculty_id` must name an existing faculty; storage rejects the write
//!   otherwise.

use crate::model::faculty::FacultyId;
use crate::model::student::{Student, StudentId};
use crate::repo::error::RepoResult;
use crate::repo::schema_check::{ensure_connection_ready, STUDENTS_TABLE};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, age, faculty_id FROM students";

/// Repository interface for student persistence.
pub trait StudentRepository {
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn find_all(&self) -> RepoResult<Vec<Student>>;
    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool>;
    /// Inserts or replaces; returns the stored row including its id.
    fn save(&self, student: &Student) -> RepoResult<Student>;
    /// Overwrites an existing row; `Ok(None)` when `id` is unset or unknown.
    /// Never inserts.
    fn update(&self, student: &Student) -> RepoResult<Option<Student>>;
    /// Removes the row if present. Deleting an absent id is a no-op.
    fn delete_by_id(&self, id: StudentId) -> RepoResult<()>;
    fn find_by_age(&self, age: i32) -> RepoResult<Vec<Student>>;
    /// Inclusive on both ends; `min > max` matches nothing.
    fn find_by_age_between(&self, min: i32, max: i32) -> RepoResult<Vec<Student>>;
    fn find_by_faculty_id(&self, faculty_id: FacultyId) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[STUDENTS_TABLE])?;
        Ok(Self { conn })
    }

    fn query_students<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Student>> {
        query_students(self.conn, filter, params)
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        self.query_students("", [])
    }

    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, student: &Student) -> RepoResult<Student> {
        let saved = self.conn.query_row(
            "INSERT INTO students (id, name, age, faculty_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                faculty_id = excluded.faculty_id
             RETURNING id, name, age, faculty_id;",
            params![
                student.id,
                student.name.as_str(),
                student.age,
                student.faculty_id
            ],
            parse_student_row,
        )?;
        Ok(saved)
    }

    fn update(&self, student: &Student) -> RepoResult<Option<Student>> {
        let Some(id) = student.id else {
            return Ok(None);
        };
        let updated = self
            .conn
            .query_row(
                "UPDATE students
                 SET name = ?2, age = ?3, faculty_id = ?4
                 WHERE id = ?1
                 RETURNING id, name, age, faculty_id;",
                params![id, student.name.as_str(), student.age, student.faculty_id],
                parse_student_row,
            )
            .optional()?;
        Ok(updated)
    }

    fn delete_by_id(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;
        if changed == 0 {
            debug!("event=student_delete module=repo status=noop id={id}");
        }
        Ok(())
    }

    fn find_by_age(&self, age: i32) -> RepoResult<Vec<Student>> {
        self.query_students("WHERE age = ?1", [age])
    }

    fn find_by_age_between(&self, min: i32, max: i32) -> RepoResult<Vec<Student>> {
        self.query_students("WHERE age BETWEEN ?1 AND ?2", [min, max])
    }

    fn find_by_faculty_id(&self, faculty_id: FacultyId) -> RepoResult<Vec<Student>> {
        self.query_students("WHERE faculty_id = ?1", [faculty_id])
    }
}

/// Runs `SELECT ... FROM students <filter> ORDER BY id`.
///
/// Shared with the faculty repository, which loads a faculty's students
/// through the same row mapping.
pub(crate) fn query_students<P: Params>(
    conn: &Connection,
    filter: &str,
    params: P,
) -> RepoResult<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
    let students = stmt
        .query_map(params, parse_student_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(students)
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        age: row.get("age")?,
        faculty_id: row.get("faculty_id")?,
    })
}
