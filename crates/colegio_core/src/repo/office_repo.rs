//! Office repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes resolve `area_id` inside the same transaction as the mutation.
//! - Deleting an office removes the persons seated in it first.

use super::{
    ensure_connection_ready, ensure_reference, map_unique_violation, RepoError, RepoResult,
};
use crate::model::office::{Office, OfficeDraft};
use crate::model::RecordId;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const OFFICE_SELECT_SQL: &str = "SELECT id, code, area_id FROM offices";

/// Repository interface for office CRUD operations.
pub trait OfficeRepository {
    fn list_offices(&self) -> RepoResult<Vec<Office>>;
    fn list_offices_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Office>>;
    fn get_office(&self, id: RecordId) -> RepoResult<Option<Office>>;
    fn create_office(&self, draft: &OfficeDraft) -> RepoResult<Office>;
    fn update_office(&self, id: RecordId, draft: &OfficeDraft) -> RepoResult<Office>;
    /// Deletes the office and the persons seated in it; returns the office
    /// as it was.
    fn delete_office(&self, id: RecordId) -> RepoResult<Office>;
}

/// SQLite-backed office repository.
pub struct SqliteOfficeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOfficeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips the schema check; the caller has already run it on `conn`.
    pub(crate) fn new_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OfficeRepository for SqliteOfficeRepository<'_> {
    fn list_offices(&self) -> RepoResult<Vec<Office>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OFFICE_SELECT_SQL} ORDER BY id ASC;"))?;
        let offices = stmt
            .query_map([], parse_office_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(offices)
    }

    fn list_offices_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Office>> {
        let mut stmt = self.conn.prepare(&format!(
            "{OFFICE_SELECT_SQL} WHERE area_id = ?1 ORDER BY id ASC;"
        ))?;
        let offices = stmt
            .query_map([area_id], parse_office_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(offices)
    }

    fn get_office(&self, id: RecordId) -> RepoResult<Option<Office>> {
        load_office(self.conn, id)
    }

    fn create_office(&self, draft: &OfficeDraft) -> RepoResult<Office> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_reference(&tx, "areas", "area_id", draft.area_id)?;
        tx.execute(
            "INSERT INTO offices (code, area_id) VALUES (?1, ?2);",
            params![draft.code.as_str(), draft.area_id],
        )
        .map_err(|err| map_unique_violation(err, "office", "code", &draft.code))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Office {
            id,
            code: draft.code.clone(),
            area_id: draft.area_id,
        })
    }

    fn update_office(&self, id: RecordId, draft: &OfficeDraft) -> RepoResult<Office> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if load_office(&tx, id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: "office",
                id,
            });
        }
        ensure_reference(&tx, "areas", "area_id", draft.area_id)?;
        tx.execute(
            "UPDATE offices SET code = ?1, area_id = ?2 WHERE id = ?3;",
            params![draft.code.as_str(), draft.area_id, id],
        )
        .map_err(|err| map_unique_violation(err, "office", "code", &draft.code))?;
        tx.commit()?;

        Ok(Office {
            id,
            code: draft.code.clone(),
            area_id: draft.area_id,
        })
    }

    fn delete_office(&self, id: RecordId) -> RepoResult<Office> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let office = load_office(&tx, id)?.ok_or(RepoError::NotFound {
            entity: "office",
            id,
        })?;

        let persons = tx.execute("DELETE FROM persons WHERE office_id = ?1;", [id])?;
        tx.execute("DELETE FROM offices WHERE id = ?1;", [id])?;
        tx.commit()?;

        info!(
            "event=office_delete module=repo status=ok office_id={} cascaded_persons={}",
            id, persons
        );
        Ok(office)
    }
}

fn load_office(conn: &Connection, id: RecordId) -> RepoResult<Option<Office>> {
    let office = conn
        .query_row(
            &format!("{OFFICE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_office_row,
        )
        .optional()?;
    Ok(office)
}

fn parse_office_row(row: &Row<'_>) -> rusqlite::Result<Office> {
    Ok(Office {
        id: row.get("id")?,
        code: row.get("code")?,
        area_id: row.get("area_id")?,
    })
}
