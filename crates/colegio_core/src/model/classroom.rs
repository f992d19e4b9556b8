//! Classroom records. Standalone, no relations.

use super::validation::{check_text, ValidationErrors};
use super::RecordId;
use serde::{Deserialize, Serialize};

pub const CLASSROOM_CODE_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: RecordId,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomDraft {
    pub code: String,
}

impl ClassroomDraft {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "code", &self.code, CLASSROOM_CODE_MAX_CHARS);
        errors.into_result()
    }
}
