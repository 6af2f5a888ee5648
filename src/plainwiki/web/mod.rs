//! # HTTP Layer
//!
//! Maps URLs onto [`AppContext`] operations.
//!
//! | Method+Path             | Handler                    |
//! |-------------------------|----------------------------|
//! | GET  `/`                | [`handlers::home`]         |
//! | GET  `/view/{title}`    | [`handlers::view`]         |
//! | GET  `/edit/{title}`    | [`handlers::edit`]         |
//! | POST `/save/{title}`    | [`handlers::save`]         |
//! | GET  `/wiki/new`        | [`handlers::new_page`]     |
//! | POST `/wiki/new/save`   | [`handlers::create`]       |
//! | GET  `/static/*`        | files from the static dir  |
//!
//! Each request runs through a short pipeline. Every stage either rejects
//! the request with its own response or passes it on:
//!
//! 1. [`middleware::log_request`] opens a span and logs the outcome
//! 2. route matching; unknown paths get 404
//! 3. extractors from [`extract`]: [`extract::PageTitle`] turns a bad title
//!    in the path into 404, [`extract::NewPageForm`] turns an empty or bad
//!    form title into 400
//! 4. the handler itself
//!
//! Form bodies have no size limit.

use crate::app::AppContext;
use crate::error::WikiError;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Router};
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::error;

pub mod extract;
pub mod handlers;
pub mod middleware;

/// Where `/view/{title}` sends the browser when the page does not exist.
pub const NOT_FOUND_PAGE: &str = "/static/404.html";

pub fn router(ctx: AppContext, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/view/{title}", get(handlers::view))
        .route("/edit/{title}", get(handlers::edit))
        .route("/save/{title}", post(handlers::save))
        .route("/wiki/new", get(handlers::new_page))
        .route("/wiki/new/save", post(handlers::create))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(axum_middleware::from_fn(middleware::log_request))
        .with_state(ctx)
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::PageNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            WikiError::InvalidTitle(_) | WikiError::EmptyTitle => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            WikiError::Io(ref e) => {
                error!(error = %e, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            WikiError::Render(ref e) => {
                error!(error = %e, "Template rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            WikiError::Serialization(_) | WikiError::IndexerStopped | WikiError::Config(_) => {
                error!(error = %self, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (WikiError::PageNotFound("x".into()), StatusCode::NOT_FOUND),
            (WikiError::EmptyTitle, StatusCode::BAD_REQUEST),
            (WikiError::InvalidTitle("a.b".into()), StatusCode::BAD_REQUEST),
            (
                WikiError::Io(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (WikiError::IndexerStopped, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
