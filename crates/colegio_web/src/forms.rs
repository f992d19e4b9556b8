//! Form payloads for the CRUD pages.
//!
//! # Responsibility
//! - Deserialize urlencoded bodies restricted to each entity's editable fields.
//! - Convert submitted text into typed drafts, collecting every field error.
//! - Describe the fields to render, with submitted values and errors.
//!
//! # Invariants
//! - Missing form keys deserialize as empty strings, never as a rejection.
//! - Conversion reports all field errors at once.

use crate::views::FormField;
use colegio_core::model::validation::ValidationErrors;
use colegio_core::{
    Area, AreaDraft, Classroom, ClassroomDraft, Office, OfficeDraft, Person, PersonDraft,
    PersonKind, ProfessorSubtype, RecordId,
};
use serde::Deserialize;

const REQUIRED: &str = "this field is required";
const INVALID_CHOICE: &str = "select a valid choice";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AreaForm {
    pub name: String,
}

impl AreaForm {
    pub fn from_record(area: &Area) -> Self {
        Self {
            name: area.name.clone(),
        }
    }

    pub fn to_draft(&self) -> Result<AreaDraft, ValidationErrors> {
        let draft = AreaDraft::new(self.name.trim());
        draft.validate()?;
        Ok(draft)
    }

    pub fn fields(&self, errors: &ValidationErrors) -> Vec<FormField> {
        vec![FormField::text("name", "Name", &self.name, errors)]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfficeForm {
    pub code: String,
    pub area_id: String,
}

impl OfficeForm {
    pub fn from_record(office: &Office) -> Self {
        Self {
            code: office.code.clone(),
            area_id: office.area_id.to_string(),
        }
    }

    pub fn to_draft(&self) -> Result<OfficeDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let area_id = parse_reference(&mut errors, "area_id", &self.area_id);
        let draft = OfficeDraft::new(self.code.trim(), area_id);
        finish(errors, draft.validate())?;
        Ok(draft)
    }

    pub fn fields(&self, errors: &ValidationErrors, areas: &[Area]) -> Vec<FormField> {
        vec![
            FormField::text("code", "Code", &self.code, errors),
            FormField::select("area_id", "Area", &self.area_id, area_choices(areas), errors),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassroomForm {
    pub code: String,
}

impl ClassroomForm {
    pub fn from_record(classroom: &Classroom) -> Self {
        Self {
            code: classroom.code.clone(),
        }
    }

    pub fn to_draft(&self) -> Result<ClassroomDraft, ValidationErrors> {
        let draft = ClassroomDraft::new(self.code.trim());
        draft.validate()?;
        Ok(draft)
    }

    pub fn fields(&self, errors: &ValidationErrors) -> Vec<FormField> {
        vec![FormField::text("code", "Code", &self.code, errors)]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonForm {
    pub document_id: String,
    pub name: String,
    pub kind: String,
    pub professor_subtype: String,
    pub area_id: String,
    pub office_id: String,
}

impl PersonForm {
    pub fn from_record(person: &Person) -> Self {
        Self {
            document_id: person.document_id.clone(),
            name: person.name.clone(),
            kind: person.kind.as_str().to_string(),
            professor_subtype: person
                .professor_subtype
                .map(|subtype| subtype.as_str().to_string())
                .unwrap_or_default(),
            area_id: person.area_id.to_string(),
            office_id: person.office_id.to_string(),
        }
    }

    pub fn to_draft(&self) -> Result<PersonDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let kind = match self.kind.trim() {
            "" => {
                errors.add("kind", REQUIRED);
                None
            }
            raw => match raw.parse::<PersonKind>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    errors.add("kind", INVALID_CHOICE);
                    None
                }
            },
        };
        let professor_subtype = match self.professor_subtype.trim() {
            "" => None,
            raw => match raw.parse::<ProfessorSubtype>() {
                Ok(subtype) => Some(subtype),
                Err(_) => {
                    errors.add("professor_subtype", INVALID_CHOICE);
                    None
                }
            },
        };
        let area_id = parse_reference(&mut errors, "area_id", &self.area_id);
        let office_id = parse_reference(&mut errors, "office_id", &self.office_id);

        let draft = PersonDraft {
            document_id: self.document_id.trim().to_string(),
            name: self.name.trim().to_string(),
            // an unparsed kind skips the subtype rule until it is corrected
            kind: kind.unwrap_or(PersonKind::Staff),
            professor_subtype,
            area_id,
            office_id,
        };
        finish(errors, draft.validate())?;
        Ok(draft)
    }

    pub fn fields(
        &self,
        errors: &ValidationErrors,
        areas: &[Area],
        offices: &[Office],
    ) -> Vec<FormField> {
        let kinds = PersonKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str().to_string(), kind.label().to_string()));
        let subtypes = ProfessorSubtype::ALL
            .into_iter()
            .map(|subtype| (subtype.as_str().to_string(), subtype.label().to_string()));
        let office_choices = offices
            .iter()
            .map(|office| (office.id.to_string(), office.code.clone()));

        vec![
            FormField::text("document_id", "Document", &self.document_id, errors),
            FormField::text("name", "Name", &self.name, errors),
            FormField::select("kind", "Type", &self.kind, kinds, errors),
            FormField::select(
                "professor_subtype",
                "Professor type",
                &self.professor_subtype,
                subtypes,
                errors,
            ),
            FormField::select("area_id", "Area", &self.area_id, area_choices(areas), errors),
            FormField::select("office_id", "Office", &self.office_id, office_choices, errors),
        ]
    }
}

fn area_choices(areas: &[Area]) -> impl Iterator<Item = (String, String)> + '_ {
    areas
        .iter()
        .map(|area| (area.id.to_string(), area.name.clone()))
}

/// Parses a selected record id; records an error and yields `0` otherwise.
fn parse_reference(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> RecordId {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return 0;
    }
    raw.parse::<RecordId>().unwrap_or_else(|_| {
        errors.add(field, INVALID_CHOICE);
        0
    })
}

fn finish(
    mut errors: ValidationErrors,
    draft_check: Result<(), ValidationErrors>,
) -> Result<(), ValidationErrors> {
    if let Err(draft_errors) = draft_check {
        errors.merge(draft_errors);
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::{OfficeForm, PersonForm};
    use colegio_core::{PersonKind, ProfessorSubtype};

    fn person_form() -> PersonForm {
        PersonForm {
            document_id: " 123 ".to_string(),
            name: "Grace".to_string(),
            kind: "professor".to_string(),
            professor_subtype: "contractor".to_string(),
            area_id: "1".to_string(),
            office_id: "2".to_string(),
        }
    }

    #[test]
    fn person_form_converts_to_trimmed_draft() {
        let draft = person_form().to_draft().unwrap();
        assert_eq!(draft.document_id, "123");
        assert_eq!(draft.kind, PersonKind::Professor);
        assert_eq!(draft.professor_subtype, Some(ProfessorSubtype::Contractor));
        assert_eq!((draft.area_id, draft.office_id), (1, 2));
    }

    #[test]
    fn person_form_reports_every_error_at_once() {
        let form = PersonForm {
            professor_subtype: String::new(),
            name: String::new(),
            office_id: "abc".to_string(),
            ..person_form()
        };
        let errors = form.to_draft().unwrap_err();
        assert_eq!(
            errors.messages_for("professor_subtype"),
            vec!["professor subtype required"]
        );
        assert_eq!(errors.messages_for("name"), vec!["this field is required"]);
        assert_eq!(errors.messages_for("office_id"), vec!["select a valid choice"]);
    }

    #[test]
    fn office_form_requires_area() {
        let form = OfficeForm {
            code: "A-1".to_string(),
            area_id: String::new(),
        };
        let errors = form.to_draft().unwrap_err();
        assert_eq!(errors.messages_for("area_id"), vec!["this field is required"]);
        assert!(errors.messages_for("code").is_empty());
    }
}
