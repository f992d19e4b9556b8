use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use colegio_core::{AreaDraft, OfficeDraft, PersonDraft, PersonKind, ProfessorSubtype};
use colegio_web::{app, Store};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (Router, Arc<Store>) {
    let store = Arc::new(Store::open_in_memory().unwrap());
    (app(Arc::clone(&store)).unwrap(), store)
}

fn seed_area_with_office(store: &Store) -> (i64, i64) {
    store
        .with_service(|service| {
            let area = service.create_area(&AreaDraft::new("Science"))?;
            let office = service.create_office(&OfficeDraft::new("S-1", area.id))?;
            Ok((area.id, office.id))
        })
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

async fn post_form(app: &Router, uri: &str, body: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn home_shows_totals_and_links() {
    let (app, store) = test_app();
    seed_area_with_office(&store);

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<th>Areas</th><td>1</td>"));
    assert!(html.contains("<th>Offices</th><td>1</td>"));
    assert!(html.contains("href=\"/export-report-pdf/\""));
}

#[tokio::test]
async fn create_area_redirects_to_list() {
    let (app, _store) = test_app();

    let response = post_form(&app, "/areas/create/", "name=Mathematics").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/areas/");

    let (status, html) = get(&app, "/areas/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Mathematics"));
}

#[tokio::test]
async fn invalid_area_form_is_redisplayed_with_errors() {
    let (app, store) = test_app();

    let response = post_form(&app, "/areas/create/", "name=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("this field is required"));
    assert!(html.contains("action=\"/areas/create/\""));
    assert!(store
        .with_service(|service| service.list_areas())
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn duplicate_office_code_shows_field_error() {
    let (app, store) = test_app();
    let (area_id, _) = seed_area_with_office(&store);

    let body = format!("code=S-1&area_id={area_id}");
    let response = post_form(&app, "/offices/create/", &body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("already exists"));
    assert!(html.contains("value=\"S-1\""));
}

#[tokio::test]
async fn professor_without_subtype_is_rejected_then_accepted() {
    let (app, store) = test_app();
    let (area_id, office_id) = seed_area_with_office(&store);

    let base = format!("document_id=9001&name=Ada&kind=professor&area_id={area_id}&office_id={office_id}");
    let rejected = post_form(&app, "/persons/create/", &base).await;
    assert_eq!(rejected.status(), StatusCode::OK);
    assert!(body_text(rejected).await.contains("professor subtype required"));

    let accepted = post_form(
        &app,
        "/persons/create/",
        &format!("{base}&professor_subtype=tenured"),
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::SEE_OTHER);

    let persons = store
        .with_service(|service| service.list_persons())
        .unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].professor_subtype, Some(ProfessorSubtype::Tenured));

    let (_, html) = get(&app, "/persons/").await;
    assert!(html.contains("Professor (Tenured)"));
}

#[tokio::test]
async fn missing_records_answer_404() {
    let (app, _store) = test_app();

    let (status, _) = get(&app, "/areas/42/update/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/persons/42/delete/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = post_form(&app, "/classrooms/42/update/", "code=X").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = post_form(&app, "/offices/42/delete/", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, html) = get(&app, "/nowhere/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("/nowhere/"));
}

#[tokio::test]
async fn update_form_is_prefilled_and_post_updates() {
    let (app, store) = test_app();
    let (area_id, _) = seed_area_with_office(&store);

    let (status, html) = get(&app, &format!("/areas/{area_id}/update/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("value=\"Science\""));

    let response = post_form(&app, &format!("/areas/{area_id}/update/"), "name=Sciences").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let area = store
        .with_service(|service| service.get_area(area_id))
        .unwrap()
        .unwrap();
    assert_eq!(area.name, "Sciences");
}

#[tokio::test]
async fn delete_area_confirms_then_cascades() {
    let (app, store) = test_app();
    let (area_id, office_id) = seed_area_with_office(&store);
    store
        .with_service(|service| {
            service.create_person(&PersonDraft {
                document_id: "1".to_string(),
                name: "Staffer".to_string(),
                kind: PersonKind::Staff,
                professor_subtype: None,
                area_id,
                office_id,
            })
        })
        .unwrap();

    let (status, html) = get(&app, &format!("/areas/{area_id}/delete/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Science"));

    let response = post_form(&app, &format!("/areas/{area_id}/delete/"), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/areas/");

    let totals = store.with_service(|service| service.totals()).unwrap();
    assert_eq!(
        (totals.total_areas, totals.total_offices, totals.total_persons),
        (0, 0, 0)
    );
}

#[tokio::test]
async fn area_report_lists_counts_and_totals() {
    let (app, store) = test_app();
    seed_area_with_office(&store);
    store
        .with_service(|service| service.create_area(&AreaDraft::new("Arts")))
        .unwrap();

    let (status, html) = get(&app, "/area-report/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Science"));
    assert!(html.contains("Arts"));
    assert!(html.contains("0 employees"));
}

#[tokio::test]
async fn pdf_export_is_an_attachment() {
    let (app, store) = test_app();
    seed_area_with_office(&store);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/export-report-pdf/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"reporte_areas.pdf\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}
