//! Classroom pages.

use super::{finish_write, render_form};
use crate::error::WebError;
use crate::forms::ClassroomForm;
use crate::state::AppState;
use crate::views::{ConfirmPage, ListPage, ListRow};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use colegio_core::model::validation::ValidationErrors;
use colegio_core::{Classroom, RecordId, RepoError};

const LIST_HREF: &str = "/classrooms/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classrooms/", get(list))
        .route("/classrooms/create/", get(create_form).post(create))
        .route("/classrooms/:id/update/", get(update_form).post(update))
        .route("/classrooms/:id/delete/", get(delete_form).post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let classrooms = state
        .store
        .with_service(|service| service.list_classrooms())?;
    let rows = classrooms
        .into_iter()
        .map(|room| ListRow::new("classrooms", room.id, vec![room.code]))
        .collect();
    state.views.render(
        "entity_list",
        &ListPage {
            title: "Classrooms",
            create_href: "/classrooms/create/".to_string(),
            columns: &["Code"],
            rows,
        },
    )
}

fn show_form(
    state: &AppState,
    id: Option<RecordId>,
    form: &ClassroomForm,
    errors: &ValidationErrors,
) -> Result<Response, WebError> {
    let (title, action) = match id {
        Some(id) => (
            "Edit classroom".to_string(),
            format!("/classrooms/{id}/update/"),
        ),
        None => ("New classroom".to_string(), "/classrooms/create/".to_string()),
    };
    render_form(state, title, action, LIST_HREF, form.fields(errors))
}

fn load(state: &AppState, id: RecordId) -> Result<Classroom, WebError> {
    state
        .store
        .with_service(|service| service.get_classroom(id))?
        .ok_or(WebError::NotFound {
            entity: "classroom",
            id,
        })
}

async fn create_form(State(state): State<AppState>) -> Result<Response, WebError> {
    show_form(
        &state,
        None,
        &ClassroomForm::default(),
        &ValidationErrors::new(),
    )
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<ClassroomForm>,
) -> Result<Response, WebError> {
    let outcome = form.to_draft().map_err(RepoError::Validation).and_then(|draft| {
        state
            .store
            .with_service(|service| service.create_classroom(&draft))
    });
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, None, &form, errors)
    })
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    let classroom = load(&state, id)?;
    show_form(
        &state,
        Some(id),
        &ClassroomForm::from_record(&classroom),
        &ValidationErrors::new(),
    )
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<ClassroomForm>,
) -> Result<Response, WebError> {
    load(&state, id)?;
    let outcome = form.to_draft().map_err(RepoError::Validation).and_then(|draft| {
        state
            .store
            .with_service(|service| service.update_classroom(id, &draft))
    });
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, Some(id), &form, errors)
    })
}

async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Html<String>, WebError> {
    let classroom = load(&state, id)?;
    state.views.render(
        "confirm_delete",
        &ConfirmPage {
            title: "Delete classroom".to_string(),
            message: format!("Delete classroom \"{}\"?", classroom.code),
            action: format!("/classrooms/{id}/delete/"),
            cancel_href: LIST_HREF.to_string(),
        },
    )
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    state
        .store
        .with_service(|service| service.delete_classroom(id))?;
    Ok(Redirect::to(LIST_HREF).into_response())
}
