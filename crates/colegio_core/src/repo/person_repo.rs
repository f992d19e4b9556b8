//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `persons` table.
//! - Resolve area and office references inside the write transaction.
//!
//! # Invariants
//! - Write paths validate and normalize drafts before SQL mutations.
//! - Read paths reject persisted rows breaking the subtype-iff-professor
//!   rule instead of masking them.
//! - No check ties `office.area_id` to `person.area_id`.

use super::{
    ensure_connection_ready, ensure_reference, map_unique_violation, RepoError, RepoResult,
};
use crate::model::person::{Person, PersonDraft, PersonKind, ProfessorSubtype};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    document_id,
    name,
    kind,
    professor_subtype,
    area_id,
    office_id
FROM persons";

/// Repository interface for person CRUD operations.
pub trait PersonRepository {
    fn list_persons(&self) -> RepoResult<Vec<Person>>;
    fn list_persons_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Person>>;
    fn list_persons_in_office(&self, office_id: RecordId) -> RepoResult<Vec<Person>>;
    fn count_persons_in_area(&self, area_id: RecordId) -> RepoResult<u64>;
    fn get_person(&self, id: RecordId) -> RepoResult<Option<Person>>;
    fn create_person(&self, draft: &PersonDraft) -> RepoResult<Person>;
    fn update_person(&self, id: RecordId, draft: &PersonDraft) -> RepoResult<Person>;
    fn delete_person(&self, id: RecordId) -> RepoResult<Person>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips the schema check; the caller has already run it on `conn`.
    pub(crate) fn new_checked(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_persons(&self, filter: &str, id: Option<RecordId>) -> RepoResult<Vec<Person>> {
        query_persons(self.conn, filter, id)
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn list_persons(&self) -> RepoResult<Vec<Person>> {
        self.query_persons("", None)
    }

    fn list_persons_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Person>> {
        self.query_persons("WHERE area_id = ?1", Some(area_id))
    }

    fn list_persons_in_office(&self, office_id: RecordId) -> RepoResult<Vec<Person>> {
        self.query_persons("WHERE office_id = ?1", Some(office_id))
    }

    fn count_persons_in_area(&self, area_id: RecordId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM persons WHERE area_id = ?1;",
            [area_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn get_person(&self, id: RecordId) -> RepoResult<Option<Person>> {
        Ok(query_persons(self.conn, "WHERE id = ?1", Some(id))?
            .into_iter()
            .next())
    }

    fn create_person(&self, draft: &PersonDraft) -> RepoResult<Person> {
        let draft = draft.clone().normalized();
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_reference(&tx, "areas", "area_id", draft.area_id)?;
        ensure_reference(&tx, "offices", "office_id", draft.office_id)?;
        tx.execute(
            "INSERT INTO persons (
                document_id,
                name,
                kind,
                professor_subtype,
                area_id,
                office_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.document_id.as_str(),
                draft.name.as_str(),
                draft.kind.as_str(),
                draft.professor_subtype.map(ProfessorSubtype::as_str),
                draft.area_id,
                draft.office_id,
            ],
        )
        .map_err(|err| map_unique_violation(err, "person", "document_id", &draft.document_id))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(person_from_draft(id, draft))
    }

    fn update_person(&self, id: RecordId, draft: &PersonDraft) -> RepoResult<Person> {
        let draft = draft.clone().normalized();
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if query_persons(&tx, "WHERE id = ?1", Some(id))?.is_empty() {
            return Err(RepoError::NotFound {
                entity: "person",
                id,
            });
        }
        ensure_reference(&tx, "areas", "area_id", draft.area_id)?;
        ensure_reference(&tx, "offices", "office_id", draft.office_id)?;
        tx.execute(
            "UPDATE persons
             SET
                document_id = ?1,
                name = ?2,
                kind = ?3,
                professor_subtype = ?4,
                area_id = ?5,
                office_id = ?6
             WHERE id = ?7;",
            params![
                draft.document_id.as_str(),
                draft.name.as_str(),
                draft.kind.as_str(),
                draft.professor_subtype.map(ProfessorSubtype::as_str),
                draft.area_id,
                draft.office_id,
                id,
            ],
        )
        .map_err(|err| map_unique_violation(err, "person", "document_id", &draft.document_id))?;
        tx.commit()?;

        Ok(person_from_draft(id, draft))
    }

    fn delete_person(&self, id: RecordId) -> RepoResult<Person> {
        let person = self.get_person(id)?.ok_or(RepoError::NotFound {
            entity: "person",
            id,
        })?;
        self.conn.execute("DELETE FROM persons WHERE id = ?1;", [id])?;
        Ok(person)
    }
}

fn person_from_draft(id: RecordId, draft: PersonDraft) -> Person {
    Person {
        id,
        document_id: draft.document_id,
        name: draft.name,
        kind: draft.kind,
        professor_subtype: draft.professor_subtype,
        area_id: draft.area_id,
        office_id: draft.office_id,
    }
}

fn query_persons(
    conn: &Connection,
    filter: &str,
    id: Option<RecordId>,
) -> RepoResult<Vec<Person>> {
    let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} {filter} ORDER BY id ASC;"))?;
    let mut rows = match id {
        Some(id) => stmt.query([id])?,
        None => stmt.query([])?,
    };

    let mut persons = Vec::new();
    while let Some(row) = rows.next()? {
        persons.push(parse_person_row(row)?);
    }
    Ok(persons)
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let id: RecordId = row.get("id")?;

    let kind_text: String = row.get("kind")?;
    let kind = kind_text.parse::<PersonKind>().map_err(|_| {
        RepoError::InvalidData(format!("invalid kind `{kind_text}` in persons.kind (id={id})"))
    })?;

    let professor_subtype = match row.get::<_, Option<String>>("professor_subtype")? {
        Some(value) => Some(value.parse::<ProfessorSubtype>().map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid subtype `{value}` in persons.professor_subtype (id={id})"
            ))
        })?),
        None => None,
    };

    if (kind == PersonKind::Professor) != professor_subtype.is_some() {
        return Err(RepoError::InvalidData(format!(
            "persons.professor_subtype does not match kind `{}` (id={id})",
            kind.as_str()
        )));
    }

    Ok(Person {
        id,
        document_id: row.get("document_id")?,
        name: row.get("name")?,
        kind,
        professor_subtype,
        area_id: row.get("area_id")?,
        office_id: row.get("office_id")?,
    })
}
