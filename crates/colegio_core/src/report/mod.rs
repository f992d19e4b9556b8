//! Headcount report: aggregation, page layout and PDF rendering.
//!
//! # Responsibility
//! - Count employees per area and compute registry-wide totals.
//! - Materialize the per-area employee listing consumed by the PDF.
//!
//! # Invariants
//! - Nothing is cached; every call re-reads the store.
//! - Areas keep insertion order; they are not sorted by name or count.

use crate::model::area::Area;
use crate::model::person::{PersonKind, ProfessorSubtype};
use crate::model::RecordId;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

pub mod layout;
pub mod pdf;

/// One area with the number of persons assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaHeadcount {
    pub area: Area,
    pub employee_count: u64,
}

/// Registry-wide record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub total_areas: u64,
    pub total_offices: u64,
    pub total_classrooms: u64,
    pub total_persons: u64,
    pub total_professors: u64,
    pub total_staff: u64,
}

/// Output of [`build_area_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaReport {
    pub areas: Vec<AreaHeadcount>,
    pub totals: ReportTotals,
}

/// One table row of an area section in the PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub document_id: String,
    pub name: String,
    /// `Professor (Tenured)`, `Staff`, ...
    pub type_label: String,
    pub office_code: String,
}

/// One area block of the PDF body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSection {
    pub area_name: String,
    pub employee_count: u64,
    pub employees: Vec<EmployeeRow>,
}

/// Everything the PDF needs, fully materialized before layout starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub generated_at: NaiveDateTime,
    pub totals: ReportTotals,
    pub sections: Vec<AreaSection>,
}

/// Computes per-area employee counts and global totals.
pub fn build_area_report(conn: &Connection) -> RepoResult<AreaReport> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, COUNT(p.id) AS employee_count
         FROM areas a
         LEFT JOIN persons p ON p.area_id = a.id
         GROUP BY a.id, a.name
         ORDER BY a.id ASC;",
    )?;
    let areas = stmt
        .query_map([], |row| {
            Ok(AreaHeadcount {
                area: Area {
                    id: row.get("id")?,
                    name: row.get("name")?,
                },
                employee_count: row.get::<_, i64>("employee_count")? as u64,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AreaReport {
        areas,
        totals: compute_totals(conn)?,
    })
}

/// Computes only the global totals.
pub fn compute_totals(conn: &Connection) -> RepoResult<ReportTotals> {
    let totals = conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM areas),
            (SELECT COUNT(*) FROM offices),
            (SELECT COUNT(*) FROM classrooms),
            (SELECT COUNT(*) FROM persons),
            (SELECT COUNT(*) FROM persons WHERE kind = 'professor'),
            (SELECT COUNT(*) FROM persons WHERE kind = 'staff');",
        [],
        |row| {
            Ok(ReportTotals {
                total_areas: row.get::<_, i64>(0)? as u64,
                total_offices: row.get::<_, i64>(1)? as u64,
                total_classrooms: row.get::<_, i64>(2)? as u64,
                total_persons: row.get::<_, i64>(3)? as u64,
                total_professors: row.get::<_, i64>(4)? as u64,
                total_staff: row.get::<_, i64>(5)? as u64,
            })
        },
    )?;
    Ok(totals)
}

/// Loads the aggregated report plus every area's employee listing.
pub fn load_report_document(
    conn: &Connection,
    generated_at: NaiveDateTime,
) -> RepoResult<ReportDocument> {
    let report = build_area_report(conn)?;

    let mut stmt = conn.prepare(
        "SELECT p.document_id, p.name, p.kind, p.professor_subtype, o.code AS office_code
         FROM persons p
         JOIN offices o ON o.id = p.office_id
         WHERE p.area_id = ?1
         ORDER BY p.id ASC;",
    )?;

    let mut sections = Vec::with_capacity(report.areas.len());
    for headcount in report.areas {
        let employees = load_employee_rows(&mut stmt, headcount.area.id)?;
        sections.push(AreaSection {
            area_name: headcount.area.name,
            employee_count: headcount.employee_count,
            employees,
        });
    }

    Ok(ReportDocument {
        generated_at,
        totals: report.totals,
        sections,
    })
}

fn load_employee_rows(
    stmt: &mut rusqlite::Statement<'_>,
    area_id: RecordId,
) -> RepoResult<Vec<EmployeeRow>> {
    let mut rows = stmt.query([area_id])?;
    let mut employees = Vec::new();
    while let Some(row) = rows.next()? {
        let kind_text: String = row.get("kind")?;
        let kind = kind_text.parse::<PersonKind>().map_err(|_| {
            RepoError::InvalidData(format!("invalid kind `{kind_text}` in persons.kind"))
        })?;
        let subtype = match row.get::<_, Option<String>>("professor_subtype")? {
            Some(value) => Some(value.parse::<ProfessorSubtype>().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid subtype `{value}` in persons.professor_subtype"
                ))
            })?),
            None => None,
        };
        let type_label = match subtype {
            Some(subtype) if kind == PersonKind::Professor => {
                format!("{} ({})", kind.label(), subtype.label())
            }
            _ => kind.label().to_string(),
        };

        employees.push(EmployeeRow {
            document_id: row.get("document_id")?,
            name: row.get("name")?,
            type_label,
            office_code: row.get("office_code")?,
        });
    }
    Ok(employees)
}
