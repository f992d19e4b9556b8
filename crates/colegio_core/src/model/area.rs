//! Area (department) records.

use super::validation::{check_text, ValidationErrors};
use super::RecordId;
use serde::{Deserialize, Serialize};

/// Longest accepted area name, in characters.
pub const AREA_NAME_MAX_CHARS: usize = 100;

/// Organizational unit owning offices and persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: RecordId,
    pub name: String,
}

/// Editable fields of an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaDraft {
    pub name: String,
}

impl AreaDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", &self.name, AREA_NAME_MAX_CHARS);
        errors.into_result()
    }
}
