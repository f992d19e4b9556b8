//! Web-layer error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use colegio_core::{PdfRenderError, RecordId, RepoError};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures surfaced by page handlers.
///
/// Validation failures never reach this type; handlers re-render the form
/// with field errors instead.
#[derive(Debug)]
pub enum WebError {
    NotFound { entity: &'static str, id: RecordId },
    Repo(RepoError),
    TemplateSetup(handlebars::TemplateError),
    Render(handlebars::RenderError),
    Pdf(PdfRenderError),
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::TemplateSetup(err) => write!(f, "template registration failed: {err}"),
            Self::Render(err) => write!(f, "template rendering failed: {err}"),
            Self::Pdf(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
            Self::TemplateSetup(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Pdf(err) => Some(err),
        }
    }
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

impl From<handlebars::TemplateError> for WebError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::TemplateSetup(value)
    }
}

impl From<handlebars::RenderError> for WebError {
    fn from(value: handlebars::RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<PdfRenderError> for WebError {
    fn from(value: PdfRenderError) -> Self {
        Self::Pdf(value)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Html(format!(
                    "<!DOCTYPE html><html><head><title>Not found</title></head>\
                     <body><h1>Not found</h1><p>{self}</p><p><a href=\"/\">Home</a></p></body></html>"
                )),
            )
                .into_response(),
            other => {
                error!("event=http_error module=web status=error error={other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(
                        "<!DOCTYPE html><html><head><title>Server error</title></head>\
                         <body><h1>Server error</h1></body></html>"
                            .to_string(),
                    ),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WebError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use colegio_core::RepoError;

    #[test]
    fn repo_not_found_maps_to_404() {
        let err = WebError::from(RepoError::NotFound {
            entity: "office",
            id: 4,
        });
        assert!(matches!(err, WebError::NotFound { entity: "office", id: 4 }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_repo_errors_map_to_500() {
        let err = WebError::from(RepoError::InvalidData("bad kind".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
