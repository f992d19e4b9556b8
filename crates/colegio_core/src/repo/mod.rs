//! Repository layer for registry records.
//!
//! # Responsibility
//! - Provide CRUD contracts per record type over SQLite storage.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Writes touching more than one row run in one immediate transaction.
//! - Lists are returned in insertion order (`ORDER BY id`).
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`,
//!   `MissingReference`) in addition to DB transport errors.

use crate::db::migrations::latest_version;
use crate::db::{schema_version, DbError};
use crate::model::validation::ValidationErrors;
use crate::model::RecordId;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod area_repo;
pub mod classroom_repo;
pub mod office_repo;
pub mod person_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from registry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Draft failed field validation; nothing was written.
    Validation(ValidationErrors),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target record does not exist.
    NotFound { entity: &'static str, id: RecordId },
    /// A unique column already holds `value`.
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// A draft references a record that does not exist.
    MissingReference { field: &'static str, id: RecordId },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl RepoError {
    /// Field-level view of errors a form can display inline.
    ///
    /// Returns `None` for transport and not-found errors.
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Duplicate { field, .. } => Some(ValidationErrors::single(field, self.to_string())),
            Self::MissingReference { field, .. } => {
                Some(ValidationErrors::single(field, self.to_string()))
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Duplicate { entity, field, value } => write!(
                f,
                "{entity} with this {} already exists: {value}",
                field.replace('_', " ")
            ),
            Self::MissingReference { field, id } => {
                write!(f, "referenced record does not exist: {field}={id}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

/// Fails with `MissingReference` unless `table` holds a row with `id`.
///
/// `table` must be a trusted identifier, never user input.
pub(crate) fn ensure_reference(
    conn: &Connection,
    table: &'static str,
    field: &'static str,
    id: RecordId,
) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MissingReference { field, id })
    }
}

/// Maps a UNIQUE violation on `entity.field` to `RepoError::Duplicate`.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> RepoError {
    let is_unique_violation = match &err {
        rusqlite::Error::SqliteFailure(failure, Some(message)) => {
            failure.code == ErrorCode::ConstraintViolation && message.starts_with("UNIQUE")
        }
        _ => false,
    };
    if is_unique_violation {
        RepoError::Duplicate {
            entity,
            field,
            value: value.to_string(),
        }
    } else {
        err.into()
    }
}
