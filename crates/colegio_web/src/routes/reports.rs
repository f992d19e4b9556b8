//! Dashboard and headcount report pages.

use crate::error::WebError;
use crate::state::AppState;
use crate::views::{HomePage, ReportPage, ReportRow, SCREENS};
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use colegio_core::{render_report_pdf, REPORT_FILE_NAME};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/area-report/", get(area_report))
        .route("/export-report-pdf/", get(export_report_pdf))
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let totals = state.store.with_service(|service| service.totals())?;
    state.views.render(
        "home",
        &HomePage {
            title: "School Management System",
            totals,
            links: &SCREENS,
        },
    )
}

async fn area_report(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let report = state
        .store
        .with_service(|service| service.build_area_report())?;
    let areas = report
        .areas
        .into_iter()
        .map(|row| ReportRow {
            name: row.area.name,
            employee_count: row.employee_count,
        })
        .collect();
    state.views.render(
        "area_report",
        &ReportPage {
            title: "Area report",
            areas,
            totals: report.totals,
        },
    )
}

async fn export_report_pdf(State(state): State<AppState>) -> Result<Response, WebError> {
    let generated_at = chrono::Local::now().naive_local();
    let document = state
        .store
        .with_service(|service| service.load_report_document(generated_at))?;
    let bytes = render_report_pdf(&document)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
