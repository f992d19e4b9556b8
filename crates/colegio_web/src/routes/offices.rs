//! Office pages.

use super::{finish_write, render_form};
use crate::error::WebError;
use crate::forms::OfficeForm;
use crate::state::AppState;
use crate::views::{ConfirmPage, ListPage, ListRow};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use colegio_core::model::validation::ValidationErrors;
use colegio_core::{Office, RecordId, RepoError};
use std::collections::HashMap;

const LIST_HREF: &str = "/offices/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/offices/", get(list))
        .route("/offices/create/", get(create_form).post(create))
        .route("/offices/:id/update/", get(update_form).post(update))
        .route("/offices/:id/delete/", get(delete_form).post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let (offices, areas) = state
        .store
        .with_service(|service| Ok((service.list_offices()?, service.list_areas()?)))?;
    let area_names: HashMap<_, _> = areas.into_iter().map(|area| (area.id, area.name)).collect();

    let rows = offices
        .into_iter()
        .map(|office| {
            let area = area_names.get(&office.area_id).cloned().unwrap_or_default();
            ListRow::new("offices", office.id, vec![office.code, area])
        })
        .collect();
    state.views.render(
        "entity_list",
        &ListPage {
            title: "Offices",
            create_href: "/offices/create/".to_string(),
            columns: &["Code", "Area"],
            rows,
        },
    )
}

fn show_form(
    state: &AppState,
    id: Option<RecordId>,
    form: &OfficeForm,
    errors: &ValidationErrors,
) -> Result<Response, WebError> {
    let areas = state.store.with_service(|service| service.list_areas())?;
    let (title, action) = match id {
        Some(id) => ("Edit office".to_string(), format!("/offices/{id}/update/")),
        None => ("New office".to_string(), "/offices/create/".to_string()),
    };
    render_form(state, title, action, LIST_HREF, form.fields(errors, &areas))
}

fn load(state: &AppState, id: RecordId) -> Result<Office, WebError> {
    state
        .store
        .with_service(|service| service.get_office(id))?
        .ok_or(WebError::NotFound {
            entity: "office",
            id,
        })
}

async fn create_form(State(state): State<AppState>) -> Result<Response, WebError> {
    show_form(&state, None, &OfficeForm::default(), &ValidationErrors::new())
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<OfficeForm>,
) -> Result<Response, WebError> {
    let outcome = form
        .to_draft()
        .map_err(RepoError::Validation)
        .and_then(|draft| state.store.with_service(|service| service.create_office(&draft)));
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, None, &form, errors)
    })
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    let office = load(&state, id)?;
    show_form(
        &state,
        Some(id),
        &OfficeForm::from_record(&office),
        &ValidationErrors::new(),
    )
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<OfficeForm>,
) -> Result<Response, WebError> {
    load(&state, id)?;
    let outcome = form.to_draft().map_err(RepoError::Validation).and_then(|draft| {
        state
            .store
            .with_service(|service| service.update_office(id, &draft))
    });
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, Some(id), &form, errors)
    })
}

async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Html<String>, WebError> {
    let office = load(&state, id)?;
    state.views.render(
        "confirm_delete",
        &ConfirmPage {
            title: "Delete office".to_string(),
            message: format!(
                "Delete office \"{}\"? Every person seated in it will be deleted too.",
                office.code
            ),
            action: format!("/offices/{id}/delete/"),
            cancel_href: LIST_HREF.to_string(),
        },
    )
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    state.store.with_service(|service| service.delete_office(id))?;
    Ok(Redirect::to(LIST_HREF).into_response())
}
