//! Repository error taxonomy shared by both entity repositories.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository and directory service operations.
///
/// A missing record is not represented here; lookups return `Ok(None)`.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A write broke a storage constraint, e.g. a student pointing at a
    /// faculty that does not exist, or deleting a faculty that still has
    /// students.
    IntegrityViolation(String),
    /// An update payload did not carry the id of the record to replace.
    MissingId(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A stored row cannot be converted into a record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::IntegrityViolation(message) => write!(f, "integrity violation: {message}"),
            Self::MissingId(entity) => write!(f, "{entity} payload has no id"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "directory repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "directory repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "directory repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::IntegrityViolation(_) => None,
            Self::MissingId(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::IntegralValueOutOfRange(column, stored) => Self::InvalidData(format!(
                "value `{stored}` in column {column} is out of range"
            )),
            rusqlite::Error::InvalidColumnType(column, name, kind) => Self::InvalidData(format!(
                "column {column} (`{name}`) holds unexpected type {kind}"
            )),
            rusqlite::Error::FromSqlConversionFailure(column, kind, err) => Self::InvalidData(
                format!("column {column} holds unconvertible {kind} value: {err}"),
            ),
            other
                if matches!(
                    other.sqlite_error_code(),
                    Some(ErrorCode::ConstraintViolation)
                ) =>
            {
                Self::IntegrityViolation(other.to_string())
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}
