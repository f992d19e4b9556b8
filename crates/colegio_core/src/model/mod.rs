//! Registry domain model: areas, offices, classrooms and persons.
//!
//! # Responsibility
//! - Define the persisted record shapes and their write-side drafts.
//! - Own field-level validation shared by forms and GraphQL mutations.
//!
//! # Invariants
//! - Records are identified by store-assigned integer ids.
//! - Drafts are validated before any write reaches the store.
//! - Deletion is physical; there are no tombstones.

pub mod area;
pub mod classroom;
pub mod office;
pub mod person;
pub mod validation;

/// Store-assigned identifier shared by every record type.
pub type RecordId = i64;
