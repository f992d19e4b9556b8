//! GraphQL endpoint, GraphiQL console and schema preview.

use crate::state::AppState;
use async_graphql::http::GraphiQLSource;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde_json::json;
use std::time::Instant;

pub const GRAPHQL_PATH: &str = "/graphql/";
const SCHEMA_PREVIEW_CHARS: usize = 500;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(GRAPHQL_PATH, post(graphql_endpoint))
        .route("/graphiql/", get(graphiql))
        .route("/debug-schema/", get(debug_schema))
}

/// Executes one `{query, variables?, operationName?}` request.
///
/// Any execution error answers 400 with the partial `data` and the
/// `errors` array; an unparseable body answers 400 with a single error.
async fn graphql_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let started_at = Instant::now();
    let request: async_graphql::Request = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!("event=graphql_execute module=web status=error reason=bad_request error={err}");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [{ "message": format!("invalid request body: {err}") }] })),
            )
                .into_response();
        }
    };

    let response = state.schema.execute(request).await;
    let elapsed_ms = started_at.elapsed().as_millis();
    if response.errors.is_empty() {
        info!("event=graphql_execute module=web status=ok duration_ms={elapsed_ms}");
        (StatusCode::OK, Json(response)).into_response()
    } else {
        let first = response
            .errors
            .first()
            .map(|err| err.message.as_str())
            .unwrap_or_default();
        warn!(
            "event=graphql_execute module=web status=error errors={} duration_ms={elapsed_ms} error={first}",
            response.errors.len()
        );
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    }
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// SDL preview for quick inspection; long schemas are cut and end with `...`.
async fn debug_schema(State(state): State<AppState>) -> Response {
    let sdl = state.schema.sdl();
    if sdl.trim().is_empty() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "error": "schema export produced no SDL" })),
        )
            .into_response();
    }
    Json(json!({ "status": "ok", "schema": schema_preview(&sdl) })).into_response()
}

fn schema_preview(sdl: &str) -> String {
    if sdl.chars().count() <= SCHEMA_PREVIEW_CHARS {
        return sdl.to_owned();
    }
    let mut preview: String = sdl.chars().take(SCHEMA_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
