//! Area repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting an area removes, in one transaction and in this order: persons
//!   assigned to the area or seated in one of its offices, the area's
//!   offices, then the area itself.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::area::{Area, AreaDraft};
use crate::model::RecordId;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const AREA_SELECT_SQL: &str = "SELECT id, name FROM areas";

/// Repository interface for area CRUD operations.
pub trait AreaRepository {
    fn list_areas(&self) -> RepoResult<Vec<Area>>;
    fn get_area(&self, id: RecordId) -> RepoResult<Option<Area>>;
    fn create_area(&self, draft: &AreaDraft) -> RepoResult<Area>;
    fn update_area(&self, id: RecordId, draft: &AreaDraft) -> RepoResult<Area>;
    /// Deletes the area and its dependents; returns the area as it was.
    fn delete_area(&self, id: RecordId) -> RepoResult<Area>;
}

/// SQLite-backed area repository.
pub struct SqliteAreaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAreaRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips the schema check; the caller has already run it on `conn`.
    pub(crate) fn new_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AreaRepository for SqliteAreaRepository<'_> {
    fn list_areas(&self) -> RepoResult<Vec<Area>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AREA_SELECT_SQL} ORDER BY id ASC;"))?;
        let areas = stmt
            .query_map([], parse_area_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(areas)
    }

    fn get_area(&self, id: RecordId) -> RepoResult<Option<Area>> {
        load_area(self.conn, id)
    }

    fn create_area(&self, draft: &AreaDraft) -> RepoResult<Area> {
        draft.validate()?;

        self.conn
            .execute("INSERT INTO areas (name) VALUES (?1);", [draft.name.as_str()])?;

        Ok(Area {
            id: self.conn.last_insert_rowid(),
            name: draft.name.clone(),
        })
    }

    fn update_area(&self, id: RecordId, draft: &AreaDraft) -> RepoResult<Area> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE areas SET name = ?1 WHERE id = ?2;",
            params![draft.name.as_str(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "area", id });
        }

        Ok(Area {
            id,
            name: draft.name.clone(),
        })
    }

    fn delete_area(&self, id: RecordId) -> RepoResult<Area> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let area = load_area(&tx, id)?.ok_or(RepoError::NotFound { entity: "area", id })?;

        let persons = tx.execute(
            "DELETE FROM persons
             WHERE area_id = ?1
                OR office_id IN (SELECT id FROM offices WHERE area_id = ?1);",
            [id],
        )?;
        let offices = tx.execute("DELETE FROM offices WHERE area_id = ?1;", [id])?;
        tx.execute("DELETE FROM areas WHERE id = ?1;", [id])?;
        tx.commit()?;

        info!(
            "event=area_delete module=repo status=ok area_id={} cascaded_offices={} cascaded_persons={}",
            id, offices, persons
        );
        Ok(area)
    }
}

fn load_area(conn: &Connection, id: RecordId) -> RepoResult<Option<Area>> {
    let area = conn
        .query_row(
            &format!("{AREA_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_area_row,
        )
        .optional()?;
    Ok(area)
}

fn parse_area_row(row: &Row<'_>) -> rusqlite::Result<Area> {
    Ok(Area {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
