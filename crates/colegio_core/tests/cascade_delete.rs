use colegio_core::db::open_db_in_memory;
use colegio_core::{AreaDraft, OfficeDraft, PersonDraft, PersonKind, SchoolService};

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
fn deleting_area_removes_its_offices_and_persons() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::try_new(&conn).unwrap();

    let doomed = service.create_area(&AreaDraft::new("Doomed")).unwrap();
    let kept = service.create_area(&AreaDraft::new("Kept")).unwrap();
    let doomed_office = service
        .create_office(&OfficeDraft::new("D-1", doomed.id))
        .unwrap();
    let kept_office = service
        .create_office(&OfficeDraft::new("K-1", kept.id))
        .unwrap();

    // assigned to the doomed area
    service
        .create_person(&staff("1", doomed.id, kept_office.id))
        .unwrap();
    // seated in the doomed area's office but assigned elsewhere
    service
        .create_person(&staff("2", kept.id, doomed_office.id))
        .unwrap();
    let survivor = service
        .create_person(&staff("3", kept.id, kept_office.id))
        .unwrap();

    let removed = service.delete_area(doomed.id).unwrap();
    assert_eq!(removed.name, "Doomed");

    assert!(service.get_area(doomed.id).unwrap().is_none());
    assert!(service.get_office(doomed_office.id).unwrap().is_none());
    assert!(service
        .list_offices()
        .unwrap()
        .iter()
        .all(|office| office.area_id != doomed.id));

    let persons = service.list_persons().unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].id, survivor.id);
}

#[test]
fn deleting_office_removes_only_persons_seated_there() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::try_new(&conn).unwrap();

    let area = service.create_area(&AreaDraft::new("Admin")).unwrap();
    let first = service
        .create_office(&OfficeDraft::new("A-1", area.id))
        .unwrap();
    let second = service
        .create_office(&OfficeDraft::new("A-2", area.id))
        .unwrap();
    service
        .create_person(&staff("10", area.id, first.id))
        .unwrap();
    let stays = service
        .create_person(&staff("11", area.id, second.id))
        .unwrap();

    let removed = service.delete_office(first.id).unwrap();
    assert_eq!(removed.code, "A-1");

    let persons = service.list_persons().unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].id, stays.id);
    assert!(service.get_area(area.id).unwrap().is_some());
}

#[test]
fn deleting_missing_area_is_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::try_new(&conn).unwrap();
    service.create_area(&AreaDraft::new("Only")).unwrap();

    assert!(service.delete_area(999).unwrap_err().is_not_found());
    assert!(service.delete_office(999).unwrap_err().is_not_found());
    assert_eq!(service.list_areas().unwrap().len(), 1);
}
