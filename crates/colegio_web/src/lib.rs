//! Web surface of the school registry: HTML pages, the PDF export and the
//! GraphQL API, served by axum over one shared [`Store`].

pub mod error;
pub mod forms;
pub mod graphql;
pub mod routes;
pub mod state;
pub mod views;

pub use error::WebError;
pub use graphql::{build_schema, SchoolSchema};
pub use routes::build_router;
pub use state::{AppState, Store};

/// Builds state and router around `store` in one step.
pub fn app(store: std::sync::Arc<Store>) -> Result<axum::Router, WebError> {
    Ok(build_router(AppState::new(store)?))
}
