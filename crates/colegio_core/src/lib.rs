//! Core domain logic for the school registry.
//! This crate is the single source of truth for registry invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::area::{Area, AreaDraft};
pub use model::classroom::{Classroom, ClassroomDraft};
pub use model::office::{Office, OfficeDraft};
pub use model::person::{Person, PersonDraft, PersonKind, ProfessorSubtype};
pub use model::validation::{FieldError, ValidationErrors};
pub use model::RecordId;
pub use report::pdf::{render_report_pdf, PdfRenderError, REPORT_FILE_NAME};
pub use report::{AreaHeadcount, AreaReport, ReportDocument, ReportTotals};
pub use repo::{RepoError, RepoResult};
pub use service::school_service::SchoolService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
