//! Office records.
//!
//! # Invariants
//! - `code` is unique across all offices.
//! - Every office belongs to exactly one area.

use super::validation::{check_text, ValidationErrors};
use super::RecordId;
use serde::{Deserialize, Serialize};

/// Longest accepted office code, in characters.
pub const OFFICE_CODE_MAX_CHARS: usize = 20;

/// Physical workspace inside one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: RecordId,
    pub code: String,
    pub area_id: RecordId,
}

/// Editable fields of an office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeDraft {
    pub code: String,
    pub area_id: RecordId,
}

impl OfficeDraft {
    pub fn new(code: impl Into<String>, area_id: RecordId) -> Self {
        Self {
            code: code.into(),
            area_id,
        }
    }

    /// Checks field shape only; the area reference is resolved by the
    /// repository inside the write transaction.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "code", &self.code, OFFICE_CODE_MAX_CHARS);
        errors.into_result()
    }
}
