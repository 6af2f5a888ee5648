//! Request guards.
//!
//! Validation happens while extracting, before a handler is called, so a
//! handler only ever sees a valid [`Title`].

use crate::model::Title;
use axum::extract::{Form, FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::debug;

/// The `{title}` segment of `/view`, `/edit` and `/save`.
///
/// Rejects with 404 when the segment is not a valid title, the same answer
/// as for a path that matches no route at all.
#[derive(Debug)]
pub struct PageTitle(pub Title);

impl<S> FromRequestParts<S> for PageTitle
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        Title::parse(&raw).map(PageTitle).map_err(|e| {
            debug!(error = %e, "Rejected page path");
            StatusCode::NOT_FOUND
        })
    }
}

/// Form body of `/save/{title}`. A missing `body` field is an empty page.
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
struct NewPageFields {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
}

/// Form body of `/wiki/new/save`: a required `title` plus the page `body`.
///
/// Rejects with 400 when the title is empty or not a valid title.
#[derive(Debug)]
pub struct NewPageForm {
    pub title: Title,
    pub body: String,
}

impl<S> FromRequest<S> for NewPageForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields) = Form::<NewPageFields>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let title = Title::parse(&fields.title).map_err(|e| {
            debug!(error = %e, "Rejected new page form");
            e.into_response()
        })?;
        Ok(NewPageForm {
            title,
            body: fields.body,
        })
    }
}
