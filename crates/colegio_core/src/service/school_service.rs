//! Registry use-case facade.
//!
//! # Responsibility
//! - Give web controllers and GraphQL resolvers one entry point per
//!   operation over a single connection.
//! - Log write outcomes with stable event names.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer holds no state besides the borrowed connection.

use crate::model::area::{Area, AreaDraft};
use crate::model::classroom::{Classroom, ClassroomDraft};
use crate::model::office::{Office, OfficeDraft};
use crate::model::person::{Person, PersonDraft};
use crate::model::RecordId;
use crate::report::{self, AreaReport, ReportDocument, ReportTotals};
use crate::repo::area_repo::{AreaRepository, SqliteAreaRepository};
use crate::repo::classroom_repo::{ClassroomRepository, SqliteClassroomRepository};
use crate::repo::office_repo::{OfficeRepository, SqliteOfficeRepository};
use crate::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use crate::repo::{ensure_connection_ready, RepoResult};
use chrono::NaiveDateTime;
use log::{info, warn};
use rusqlite::Connection;

/// Use-case service over one migrated registry connection.
pub struct SchoolService<'conn> {
    conn: &'conn Connection,
    areas: SqliteAreaRepository<'conn>,
    offices: SqliteOfficeRepository<'conn>,
    classrooms: SqliteClassroomRepository<'conn>,
    persons: SqlitePersonRepository<'conn>,
}

impl<'conn> SchoolService<'conn> {
    /// Builds the service; fails when the connection is not migrated.
    ///
    /// The schema version is read once and shared by all four repositories.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            areas: SqliteAreaRepository::new_checked(conn),
            offices: SqliteOfficeRepository::new_checked(conn),
            classrooms: SqliteClassroomRepository::new_checked(conn),
            persons: SqlitePersonRepository::new_checked(conn),
        })
    }

    pub fn list_areas(&self) -> RepoResult<Vec<Area>> {
        self.areas.list_areas()
    }

    pub fn get_area(&self, id: RecordId) -> RepoResult<Option<Area>> {
        self.areas.get_area(id)
    }

    pub fn create_area(&self, draft: &AreaDraft) -> RepoResult<Area> {
        logged("area_create", self.areas.create_area(draft), |area| area.id)
    }

    pub fn update_area(&self, id: RecordId, draft: &AreaDraft) -> RepoResult<Area> {
        logged("area_update", self.areas.update_area(id, draft), |area| area.id)
    }

    /// Deletes the area together with its offices and persons.
    pub fn delete_area(&self, id: RecordId) -> RepoResult<Area> {
        logged("area_delete", self.areas.delete_area(id), |area| area.id)
    }

    pub fn list_offices(&self) -> RepoResult<Vec<Office>> {
        self.offices.list_offices()
    }

    pub fn list_offices_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Office>> {
        self.offices.list_offices_in_area(area_id)
    }

    pub fn get_office(&self, id: RecordId) -> RepoResult<Option<Office>> {
        self.offices.get_office(id)
    }

    pub fn create_office(&self, draft: &OfficeDraft) -> RepoResult<Office> {
        logged("office_create", self.offices.create_office(draft), |office| {
            office.id
        })
    }

    pub fn update_office(&self, id: RecordId, draft: &OfficeDraft) -> RepoResult<Office> {
        logged(
            "office_update",
            self.offices.update_office(id, draft),
            |office| office.id,
        )
    }

    /// Deletes the office together with the persons seated in it.
    pub fn delete_office(&self, id: RecordId) -> RepoResult<Office> {
        logged("office_delete", self.offices.delete_office(id), |office| {
            office.id
        })
    }

    pub fn list_classrooms(&self) -> RepoResult<Vec<Classroom>> {
        self.classrooms.list_classrooms()
    }

    pub fn get_classroom(&self, id: RecordId) -> RepoResult<Option<Classroom>> {
        self.classrooms.get_classroom(id)
    }

    pub fn create_classroom(&self, draft: &ClassroomDraft) -> RepoResult<Classroom> {
        logged(
            "classroom_create",
            self.classrooms.create_classroom(draft),
            |classroom| classroom.id,
        )
    }

    pub fn update_classroom(&self, id: RecordId, draft: &ClassroomDraft) -> RepoResult<Classroom> {
        logged(
            "classroom_update",
            self.classrooms.update_classroom(id, draft),
            |classroom| classroom.id,
        )
    }

    pub fn delete_classroom(&self, id: RecordId) -> RepoResult<Classroom> {
        logged(
            "classroom_delete",
            self.classrooms.delete_classroom(id),
            |classroom| classroom.id,
        )
    }

    pub fn list_persons(&self) -> RepoResult<Vec<Person>> {
        self.persons.list_persons()
    }

    pub fn list_persons_in_area(&self, area_id: RecordId) -> RepoResult<Vec<Person>> {
        self.persons.list_persons_in_area(area_id)
    }

    pub fn list_persons_in_office(&self, office_id: RecordId) -> RepoResult<Vec<Person>> {
        self.persons.list_persons_in_office(office_id)
    }

    pub fn count_persons_in_area(&self, area_id: RecordId) -> RepoResult<u64> {
        self.persons.count_persons_in_area(area_id)
    }

    pub fn get_person(&self, id: RecordId) -> RepoResult<Option<Person>> {
        self.persons.get_person(id)
    }

    pub fn create_person(&self, draft: &PersonDraft) -> RepoResult<Person> {
        logged("person_create", self.persons.create_person(draft), |person| {
            person.id
        })
    }

    pub fn update_person(&self, id: RecordId, draft: &PersonDraft) -> RepoResult<Person> {
        logged(
            "person_update",
            self.persons.update_person(id, draft),
            |person| person.id,
        )
    }

    pub fn delete_person(&self, id: RecordId) -> RepoResult<Person> {
        logged("person_delete", self.persons.delete_person(id), |person| {
            person.id
        })
    }

    /// Per-area employee counts plus global totals, recomputed per call.
    pub fn build_area_report(&self) -> RepoResult<AreaReport> {
        report::build_area_report(self.conn)
    }

    pub fn totals(&self) -> RepoResult<ReportTotals> {
        report::compute_totals(self.conn)
    }

    /// Materializes the full PDF input stamped with `generated_at`.
    pub fn load_report_document(&self, generated_at: NaiveDateTime) -> RepoResult<ReportDocument> {
        report::load_report_document(self.conn, generated_at)
    }
}

fn logged<T>(
    event: &'static str,
    result: RepoResult<T>,
    id_of: impl FnOnce(&T) -> RecordId,
) -> RepoResult<T> {
    match &result {
        Ok(record) => info!("event={event} module=service status=ok id={}", id_of(record)),
        Err(err) => warn!("event={event} module=service status=error error={err}"),
    }
    result
}
