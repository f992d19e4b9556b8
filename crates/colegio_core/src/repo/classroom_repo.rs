//! Classroom repository contract and SQLite implementation.

use super::{ensure_connection_ready, map_unique_violation, RepoError, RepoResult};
use crate::model::classroom::{Classroom, ClassroomDraft};
use crate::model::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLASSROOM_SELECT_SQL: &str = "SELECT id, code FROM classrooms";

/// Repository interface for classroom CRUD operations.
pub trait ClassroomRepository {
    fn list_classrooms(&self) -> RepoResult<Vec<Classroom>>;
    fn get_classroom(&self, id: RecordId) -> RepoResult<Option<Classroom>>;
    fn create_classroom(&self, draft: &ClassroomDraft) -> RepoResult<Classroom>;
    fn update_classroom(&self, id: RecordId, draft: &ClassroomDraft) -> RepoResult<Classroom>;
    fn delete_classroom(&self, id: RecordId) -> RepoResult<Classroom>;
}

/// SQLite-backed classroom repository.
pub struct SqliteClassroomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassroomRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips the schema check; the caller has already run it on `conn`.
    pub(crate) fn new_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClassroomRepository for SqliteClassroomRepository<'_> {
    fn list_classrooms(&self) -> RepoResult<Vec<Classroom>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLASSROOM_SELECT_SQL} ORDER BY id ASC;"))?;
        let classrooms = stmt
            .query_map([], parse_classroom_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(classrooms)
    }

    fn get_classroom(&self, id: RecordId) -> RepoResult<Option<Classroom>> {
        let classroom = self
            .conn
            .query_row(
                &format!("{CLASSROOM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_classroom_row,
            )
            .optional()?;
        Ok(classroom)
    }

    fn create_classroom(&self, draft: &ClassroomDraft) -> RepoResult<Classroom> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO classrooms (code) VALUES (?1);",
                [draft.code.as_str()],
            )
            .map_err(|err| map_unique_violation(err, "classroom", "code", &draft.code))?;

        Ok(Classroom {
            id: self.conn.last_insert_rowid(),
            code: draft.code.clone(),
        })
    }

    fn update_classroom(&self, id: RecordId, draft: &ClassroomDraft) -> RepoResult<Classroom> {
        draft.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE classrooms SET code = ?1 WHERE id = ?2;",
                params![draft.code.as_str(), id],
            )
            .map_err(|err| map_unique_violation(err, "classroom", "code", &draft.code))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "classroom",
                id,
            });
        }

        Ok(Classroom {
            id,
            code: draft.code.clone(),
        })
    }

    fn delete_classroom(&self, id: RecordId) -> RepoResult<Classroom> {
        let classroom = self.get_classroom(id)?.ok_or(RepoError::NotFound {
            entity: "classroom",
            id,
        })?;
        self.conn
            .execute("DELETE FROM classrooms WHERE id = ?1;", [id])?;
        Ok(classroom)
    }
}

fn parse_classroom_row(row: &Row<'_>) -> rusqlite::Result<Classroom> {
    Ok(Classroom {
        id: row.get("id")?,
        code: row.get("code")?,
    })
}
