//! Area pages.

use super::{finish_write, render_form};
use crate::error::WebError;
use crate::forms::AreaForm;
use crate::state::AppState;
use crate::views::{ConfirmPage, ListPage, ListRow};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use colegio_core::model::validation::ValidationErrors;
use colegio_core::{Area, RecordId, RepoError};

const LIST_HREF: &str = "/areas/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/areas/", get(list))
        .route("/areas/create/", get(create_form).post(create))
        .route("/areas/:id/update/", get(update_form).post(update))
        .route("/areas/:id/delete/", get(delete_form).post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let areas = state.store.with_service(|service| service.list_areas())?;
    let rows = areas
        .into_iter()
        .map(|area| ListRow::new("areas", area.id, vec![area.name]))
        .collect();
    state.views.render(
        "entity_list",
        &ListPage {
            title: "Areas",
            create_href: "/areas/create/".to_string(),
            columns: &["Name"],
            rows,
        },
    )
}

fn show_form(
    state: &AppState,
    id: Option<RecordId>,
    form: &AreaForm,
    errors: &ValidationErrors,
) -> Result<Response, WebError> {
    let (title, action) = match id {
        Some(id) => ("Edit area".to_string(), format!("/areas/{id}/update/")),
        None => ("New area".to_string(), "/areas/create/".to_string()),
    };
    render_form(state, title, action, LIST_HREF, form.fields(errors))
}

fn load(state: &AppState, id: RecordId) -> Result<Area, WebError> {
    state
        .store
        .with_service(|service| service.get_area(id))?
        .ok_or(WebError::NotFound { entity: "area", id })
}

async fn create_form(State(state): State<AppState>) -> Result<Response, WebError> {
    show_form(&state, None, &AreaForm::default(), &ValidationErrors::new())
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<AreaForm>,
) -> Result<Response, WebError> {
    let outcome = form
        .to_draft()
        .map_err(RepoError::Validation)
        .and_then(|draft| state.store.with_service(|service| service.create_area(&draft)));
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, None, &form, errors)
    })
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    let area = load(&state, id)?;
    show_form(
        &state,
        Some(id),
        &AreaForm::from_record(&area),
        &ValidationErrors::new(),
    )
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<AreaForm>,
) -> Result<Response, WebError> {
    load(&state, id)?;
    let outcome = form
        .to_draft()
        .map_err(RepoError::Validation)
        .and_then(|draft| {
            state
                .store
                .with_service(|service| service.update_area(id, &draft))
        });
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, Some(id), &form, errors)
    })
}

async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Html<String>, WebError> {
    let area = load(&state, id)?;
    state.views.render(
        "confirm_delete",
        &ConfirmPage {
            title: "Delete area".to_string(),
            message: format!(
                "Delete area \"{}\"? Its offices and every person assigned to it will be deleted too.",
                area.name
            ),
            action: format!("/areas/{id}/delete/"),
            cancel_href: LIST_HREF.to_string(),
        },
    )
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    state.store.with_service(|service| service.delete_area(id))?;
    Ok(Redirect::to(LIST_HREF).into_response())
}
