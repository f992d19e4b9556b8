//! HTTP routes.
//!
//! # Responsibility
//! - Assemble the page, report and GraphQL routes into one router.
//! - Log every request with method, path, status and duration.
//!
//! # Invariants
//! - Successful form posts answer `303 See Other` to the entity list.
//! - Rejected form posts answer `200` with the form and its field errors.

use crate::error::WebError;
use crate::state::AppState;
use crate::views::{FormField, FormPage, NotFoundPage};
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;
use colegio_core::model::validation::ValidationErrors;
use colegio_core::RepoResult;
use log::{info, warn};
use std::time::Instant;

pub mod areas;
pub mod classrooms;
pub mod graphql;
pub mod offices;
pub mod persons;
pub mod reports;

/// Builds the complete application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(reports::router())
        .merge(areas::router())
        .merge(offices::router())
        .merge(classrooms::router())
        .merge(persons::router())
        .merge(graphql::router())
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();
    if status.is_server_error() {
        warn!(
            "event=http_request module=web status=error method={method} path={path} http_status={} duration_ms={elapsed_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=web status=ok method={method} path={path} http_status={} duration_ms={elapsed_ms}",
            status.as_u16()
        );
    }
    response
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Result<Response, WebError> {
    let page = state.views.render(
        "not_found",
        &NotFoundPage {
            path: uri.path().to_owned(),
        },
    )?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}

/// Turns a write outcome into a redirect, an inline-error form, or an error.
///
/// `render_form` receives the field errors to display alongside the
/// submitted values.
pub(crate) fn finish_write<T>(
    outcome: RepoResult<T>,
    list_href: &'static str,
    render_form: impl FnOnce(&ValidationErrors) -> Result<Response, WebError>,
) -> Result<Response, WebError> {
    match outcome {
        Ok(_) => Ok(Redirect::to(list_href).into_response()),
        Err(err) => match err.field_errors() {
            Some(errors) => render_form(&errors),
            None => Err(err.into()),
        },
    }
}

pub(crate) fn render_form(
    state: &AppState,
    title: String,
    action: String,
    cancel_href: &str,
    fields: Vec<FormField>,
) -> Result<Response, WebError> {
    let page = FormPage {
        title,
        action,
        cancel_href: cancel_href.to_string(),
        fields,
    };
    Ok(state.views.render("entity_form", &page)?.into_response())
}
