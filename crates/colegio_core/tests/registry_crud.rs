use colegio_core::db::open_db_in_memory;
use colegio_core::{
    AreaDraft, ClassroomDraft, OfficeDraft, PersonDraft, PersonKind, ProfessorSubtype, RepoError,
    SchoolService,
};
use rusqlite::Connection;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn staff(document_id: &str, area_id: i64, office_id: i64) -> PersonDraft {
    PersonDraft {
        document_id: document_id.to_string(),
        name: format!("Person {document_id}"),
        kind: PersonKind::Staff,
        professor_subtype: None,
        area_id,
        office_id,
    }
}

#[test]
fn areas_list_in_insertion_order() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();

    let science = service.create_area(&AreaDraft::new("Science")).unwrap();
    let arts = service.create_area(&AreaDraft::new("Arts")).unwrap();

    let names: Vec<_> = service
        .list_areas()
        .unwrap()
        .into_iter()
        .map(|area| area.name)
        .collect();
    assert_eq!(names, vec!["Science", "Arts"]);
    assert!(science.id < arts.id);
}

#[test]
fn update_area_changes_name_and_missing_id_is_not_found() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();

    let area = service.create_area(&AreaDraft::new("Maths")).unwrap();
    let updated = service
        .update_area(area.id, &AreaDraft::new("Mathematics"))
        .unwrap();
    assert_eq!(updated.name, "Mathematics");
    assert_eq!(
        service.get_area(area.id).unwrap().unwrap().name,
        "Mathematics"
    );

    let err = service
        .update_area(999, &AreaDraft::new("Ghost"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "area", id: 999 }));
}

#[test]
fn blank_area_name_is_rejected_before_write() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();

    let err = service.create_area(&AreaDraft::new("  ")).unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.messages_for("name"), vec!["this field is required"]);
    assert!(service.list_areas().unwrap().is_empty());
}

#[test]
fn duplicate_office_code_is_rejected() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();

    service
        .create_office(&OfficeDraft::new("A-101", area.id))
        .unwrap();
    let err = service
        .create_office(&OfficeDraft::new("A-101", area.id))
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: "office",
            field: "code",
            ..
        }
    ));
    let fields = err.field_errors().unwrap();
    assert!(fields.messages_for("code")[0].contains("already exists"));
    assert_eq!(service.list_offices().unwrap().len(), 1);
}

#[test]
fn office_update_to_taken_code_is_rejected() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();
    service
        .create_office(&OfficeDraft::new("A-101", area.id))
        .unwrap();
    let second = service
        .create_office(&OfficeDraft::new("A-102", area.id))
        .unwrap();

    let err = service
        .update_office(second.id, &OfficeDraft::new("A-101", area.id))
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { .. }));
    assert_eq!(
        service.get_office(second.id).unwrap().unwrap().code,
        "A-102"
    );
}

#[test]
fn office_with_missing_area_is_rejected_as_field_error() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();

    let err = service
        .create_office(&OfficeDraft::new("B-1", 77))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            field: "area_id",
            id: 77
        }
    ));
    assert_eq!(err.field_errors().unwrap().messages_for("area_id").len(), 1);
}

#[test]
fn classroom_crud_roundtrip() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();

    let room = service
        .create_classroom(&ClassroomDraft::new("LAB-1"))
        .unwrap();
    service
        .update_classroom(room.id, &ClassroomDraft::new("LAB-2"))
        .unwrap();
    assert_eq!(
        service.get_classroom(room.id).unwrap().unwrap().code,
        "LAB-2"
    );

    let dup = service
        .create_classroom(&ClassroomDraft::new("LAB-2"))
        .unwrap_err();
    assert!(matches!(dup, RepoError::Duplicate { .. }));

    let removed = service.delete_classroom(room.id).unwrap();
    assert_eq!(removed.code, "LAB-2");
    assert!(service.get_classroom(room.id).unwrap().is_none());
    assert!(service.delete_classroom(room.id).unwrap_err().is_not_found());
}

#[test]
fn professor_requires_subtype_and_succeeds_with_tenured() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Science")).unwrap();
    let office = service
        .create_office(&OfficeDraft::new("S-1", area.id))
        .unwrap();

    let mut draft = PersonDraft {
        document_id: "1001".to_string(),
        name: "Marie".to_string(),
        kind: PersonKind::Professor,
        professor_subtype: None,
        area_id: area.id,
        office_id: office.id,
    };
    let err = service.create_person(&draft).unwrap_err();
    assert_eq!(
        err.field_errors().unwrap().messages_for("professor_subtype"),
        vec!["professor subtype required"]
    );
    assert!(service.list_persons().unwrap().is_empty());

    draft.professor_subtype = Some(ProfessorSubtype::Tenured);
    let person = service.create_person(&draft).unwrap();
    assert_eq!(person.professor_subtype, Some(ProfessorSubtype::Tenured));
    assert_eq!(person.type_label(), "Professor (Tenured)");
}

#[test]
fn staff_subtype_is_dropped_and_kind_subtype_invariant_holds() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();
    let office = service
        .create_office(&OfficeDraft::new("AD-1", area.id))
        .unwrap();

    let mut draft = staff("2001", area.id, office.id);
    draft.professor_subtype = Some(ProfessorSubtype::Contractor);
    let person = service.create_person(&draft).unwrap();
    assert_eq!(person.professor_subtype, None);

    let mut professor = staff("2002", area.id, office.id);
    professor.kind = PersonKind::Professor;
    professor.professor_subtype = Some(ProfessorSubtype::Contractor);
    service.create_person(&professor).unwrap();

    for person in service.list_persons().unwrap() {
        assert_eq!(
            person.kind == PersonKind::Professor,
            person.professor_subtype.is_some()
        );
    }
}

#[test]
fn duplicate_document_id_is_rejected() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();
    let office = service
        .create_office(&OfficeDraft::new("AD-1", area.id))
        .unwrap();

    service
        .create_person(&staff("3001", area.id, office.id))
        .unwrap();
    let err = service
        .create_person(&staff("3001", area.id, office.id))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: "person",
            field: "document_id",
            ..
        }
    ));
}

#[test]
fn person_office_area_may_differ_from_person_area() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let science = service.create_area(&AreaDraft::new("Science")).unwrap();
    let arts = service.create_area(&AreaDraft::new("Arts")).unwrap();
    let arts_office = service
        .create_office(&OfficeDraft::new("AR-1", arts.id))
        .unwrap();

    let person = service
        .create_person(&staff("4001", science.id, arts_office.id))
        .unwrap();
    assert_eq!(person.area_id, science.id);
    assert_eq!(person.office_id, arts_office.id);
}

#[test]
fn person_update_and_delete_return_affected_record() {
    let conn = setup();
    let service = SchoolService::try_new(&conn).unwrap();
    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();
    let office = service
        .create_office(&OfficeDraft::new("AD-1", area.id))
        .unwrap();
    let person = service
        .create_person(&staff("5001", area.id, office.id))
        .unwrap();

    let mut draft = staff("5001", area.id, office.id);
    draft.name = "Renamed".to_string();
    let updated = service.update_person(person.id, &draft).unwrap();
    assert_eq!(updated.name, "Renamed");

    let missing_office = staff("5001", area.id, 404);
    let err = service
        .update_person(person.id, &missing_office)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference {
            field: "office_id",
            ..
        }
    ));

    let removed = service.delete_person(person.id).unwrap();
    assert_eq!(removed.name, "Renamed");
    assert!(service.get_person(person.id).unwrap().is_none());
    assert!(service
        .update_person(person.id, &draft)
        .unwrap_err()
        .is_not_found());
}
