//! Person pages.

use super::{finish_write, render_form};
use crate::error::WebError;
use crate::forms::PersonForm;
use crate::state::AppState;
use crate::views::{ConfirmPage, ListPage, ListRow};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use colegio_core::model::validation::ValidationErrors;
use colegio_core::{Person, RecordId, RepoError};
use std::collections::HashMap;

const LIST_HREF: &str = "/persons/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/persons/", get(list))
        .route("/persons/create/", get(create_form).post(create))
        .route("/persons/:id/update/", get(update_form).post(update))
        .route("/persons/:id/delete/", get(delete_form).post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let (persons, areas, offices) = state.store.with_service(|service| {
        Ok((
            service.list_persons()?,
            service.list_areas()?,
            service.list_offices()?,
        ))
    })?;
    let area_names: HashMap<_, _> = areas.into_iter().map(|area| (area.id, area.name)).collect();
    let office_codes: HashMap<_, _> = offices
        .into_iter()
        .map(|office| (office.id, office.code))
        .collect();

    let rows = persons
        .into_iter()
        .map(|person| {
            let cells = vec![
                person.document_id.clone(),
                person.name.clone(),
                person.type_label(),
                area_names.get(&person.area_id).cloned().unwrap_or_default(),
                office_codes
                    .get(&person.office_id)
                    .cloned()
                    .unwrap_or_default(),
            ];
            ListRow::new("persons", person.id, cells)
        })
        .collect();
    state.views.render(
        "entity_list",
        &ListPage {
            title: "Persons",
            create_href: "/persons/create/".to_string(),
            columns: &["Document", "Name", "Type", "Area", "Office"],
            rows,
        },
    )
}

fn show_form(
    state: &AppState,
    id: Option<RecordId>,
    form: &PersonForm,
    errors: &ValidationErrors,
) -> Result<Response, WebError> {
    let (areas, offices) = state
        .store
        .with_service(|service| Ok((service.list_areas()?, service.list_offices()?)))?;
    let (title, action) = match id {
        Some(id) => ("Edit person".to_string(), format!("/persons/{id}/update/")),
        None => ("New person".to_string(), "/persons/create/".to_string()),
    };
    render_form(
        state,
        title,
        action,
        LIST_HREF,
        form.fields(errors, &areas, &offices),
    )
}

fn load(state: &AppState, id: RecordId) -> Result<Person, WebError> {
    state
        .store
        .with_service(|service| service.get_person(id))?
        .ok_or(WebError::NotFound {
            entity: "person",
            id,
        })
}

async fn create_form(State(state): State<AppState>) -> Result<Response, WebError> {
    show_form(&state, None, &PersonForm::default(), &ValidationErrors::new())
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<PersonForm>,
) -> Result<Response, WebError> {
    let outcome = form
        .to_draft()
        .map_err(RepoError::Validation)
        .and_then(|draft| state.store.with_service(|service| service.create_person(&draft)));
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, None, &form, errors)
    })
}

async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    let person = load(&state, id)?;
    show_form(
        &state,
        Some(id),
        &PersonForm::from_record(&person),
        &ValidationErrors::new(),
    )
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<PersonForm>,
) -> Result<Response, WebError> {
    load(&state, id)?;
    let outcome = form.to_draft().map_err(RepoError::Validation).and_then(|draft| {
        state
            .store
            .with_service(|service| service.update_person(id, &draft))
    });
    finish_write(outcome, LIST_HREF, |errors| {
        show_form(&state, Some(id), &form, errors)
    })
}

async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Html<String>, WebError> {
    let person = load(&state, id)?;
    state.views.render(
        "confirm_delete",
        &ConfirmPage {
            title: "Delete person".to_string(),
            message: format!(
                "Delete {} ({})?",
                person.name, person.document_id
            ),
            action: format!("/persons/{id}/delete/"),
            cancel_href: LIST_HREF.to_string(),
        },
    )
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Response, WebError> {
    state.store.with_service(|service| service.delete_person(id))?;
    Ok(Redirect::to(LIST_HREF).into_response())
}
