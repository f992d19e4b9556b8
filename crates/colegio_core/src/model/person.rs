//! Person (employee) records.
//!
//! # Responsibility
//! - Define the employee record and its professor/staff classification.
//! - Enforce the professor subtype rule before persistence.
//!
//! # Invariants
//! - `professor_subtype` is `Some` if and only if `kind == Professor`.
//! - `document_id` is unique across all persons.
//! - `area_id` and `office_id` are independent; the office's area may differ
//!   from the person's area.

use super::validation::{check_text, ValidationErrors};
use super::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DOCUMENT_ID_MAX_CHARS: usize = 20;
pub const PERSON_NAME_MAX_CHARS: usize = 100;

/// Employee classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    /// Teaching staff; carries a `ProfessorSubtype`.
    Professor,
    /// Administrative staff.
    Staff,
}

/// Contract type of a professor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessorSubtype {
    Tenured,
    Contractor,
}

impl PersonKind {
    pub const ALL: [PersonKind; 2] = [PersonKind::Professor, PersonKind::Staff];

    /// Stable storage and wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professor => "professor",
            Self::Staff => "staff",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Professor => "Professor",
            Self::Staff => "Staff",
        }
    }
}

impl ProfessorSubtype {
    pub const ALL: [ProfessorSubtype; 2] = [ProfessorSubtype::Tenured, ProfessorSubtype::Contractor];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tenured => "tenured",
            Self::Contractor => "contractor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tenured => "Tenured",
            Self::Contractor => "Contractor",
        }
    }
}

/// Rejected classification text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice {
    pub value: String,
    pub expected: &'static str,
}

impl Display for UnknownChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "select a valid choice; `{}` is not one of {}",
            self.value, self.expected
        )
    }
}

impl std::error::Error for UnknownChoice {}

impl FromStr for PersonKind {
    type Err = UnknownChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "professor" => Ok(Self::Professor),
            "staff" => Ok(Self::Staff),
            other => Err(UnknownChoice {
                value: other.to_string(),
                expected: "professor|staff",
            }),
        }
    }
}

impl FromStr for ProfessorSubtype {
    type Err = UnknownChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "tenured" => Ok(Self::Tenured),
            "contractor" => Ok(Self::Contractor),
            other => Err(UnknownChoice {
                value: other.to_string(),
                expected: "tenured|contractor",
            }),
        }
    }
}

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: RecordId,
    pub document_id: String,
    pub name: String,
    pub kind: PersonKind,
    pub professor_subtype: Option<ProfessorSubtype>,
    pub area_id: RecordId,
    pub office_id: RecordId,
}

impl Person {
    /// Type column text, e.g. `Professor (Tenured)` or `Staff`.
    pub fn type_label(&self) -> String {
        match (self.kind, self.professor_subtype) {
            (PersonKind::Professor, Some(subtype)) => {
                format!("{} ({})", self.kind.label(), subtype.label())
            }
            (kind, _) => kind.label().to_string(),
        }
    }
}

/// Editable fields of a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub document_id: String,
    pub name: String,
    pub kind: PersonKind,
    pub professor_subtype: Option<ProfessorSubtype>,
    pub area_id: RecordId,
    pub office_id: RecordId,
}

impl PersonDraft {
    /// Checks text fields and the professor subtype rule.
    ///
    /// # Errors
    /// - `professor_subtype`: "professor subtype required" when a professor
    ///   has no subtype.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_text(
            &mut errors,
            "document_id",
            &self.document_id,
            DOCUMENT_ID_MAX_CHARS,
        );
        check_text(&mut errors, "name", &self.name, PERSON_NAME_MAX_CHARS);
        if self.kind == PersonKind::Professor && self.professor_subtype.is_none() {
            errors.add("professor_subtype", "professor subtype required");
        }
        errors.into_result()
    }

    /// Drops a subtype carried by a staff draft so the stored record keeps
    /// the subtype-iff-professor invariant.
    pub fn normalized(mut self) -> Self {
        if self.kind == PersonKind::Staff {
            self.professor_subtype = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{PersonDraft, PersonKind, ProfessorSubtype};

    fn draft(kind: PersonKind, subtype: Option<ProfessorSubtype>) -> PersonDraft {
        PersonDraft {
            document_id: "1001".to_string(),
            name: "Ada".to_string(),
            kind,
            professor_subtype: subtype,
            area_id: 1,
            office_id: 1,
        }
    }

    #[test]
    fn professor_without_subtype_is_rejected() {
        let errors = draft(PersonKind::Professor, None).validate().unwrap_err();
        assert_eq!(
            errors.messages_for("professor_subtype"),
            vec!["professor subtype required"]
        );
    }

    #[test]
    fn professor_with_subtype_and_staff_without_are_accepted() {
        draft(PersonKind::Professor, Some(ProfessorSubtype::Tenured))
            .validate()
            .unwrap();
        draft(PersonKind::Staff, None).validate().unwrap();
    }

    #[test]
    fn normalized_clears_staff_subtype_only() {
        let staff = draft(PersonKind::Staff, Some(ProfessorSubtype::Contractor)).normalized();
        assert_eq!(staff.professor_subtype, None);

        let professor =
            draft(PersonKind::Professor, Some(ProfessorSubtype::Contractor)).normalized();
        assert_eq!(
            professor.professor_subtype,
            Some(ProfessorSubtype::Contractor)
        );
    }

    #[test]
    fn kinds_parse_from_wire_values() {
        assert_eq!("professor".parse::<PersonKind>(), Ok(PersonKind::Professor));
        assert_eq!(" staff ".parse::<PersonKind>(), Ok(PersonKind::Staff));
        assert!("janitor".parse::<PersonKind>().is_err());
        assert_eq!(
            "tenured".parse::<ProfessorSubtype>(),
            Ok(ProfessorSubtype::Tenured)
        );
    }
}
