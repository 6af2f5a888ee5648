use super::extract::{NewPageForm, PageTitle, SaveForm};
use super::NOT_FOUND_PAGE;
use crate::app::AppContext;
use crate::error::{Result, WikiError};
use crate::index::{IndexEntry, IndexSnapshot};
use crate::model::Page;
use crate::render;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::context;
use serde::Serialize;
use std::borrow::Cow;

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    body: Cow<'a, str>,
}

impl<'a> From<&'a Page> for PageView<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            title: page.title.as_str(),
            body: page.body_text(),
        }
    }
}

#[derive(Serialize)]
struct HomeView<'a> {
    pages: Vec<IndexEntry<'a>>,
    indexed_at: Option<String>,
}

impl<'a> From<&'a IndexSnapshot> for HomeView<'a> {
    fn from(snapshot: &'a IndexSnapshot) -> Self {
        Self {
            pages: snapshot.index.entries().collect(),
            indexed_at: snapshot
                .built_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        }
    }
}

fn render_html<T: Serialize>(ctx: &AppContext, name: &str, data: &T) -> Result<Html<String>> {
    ctx.render(name, data).map(Html)
}

pub async fn home(State(ctx): State<AppContext>) -> Result<Html<String>> {
    let snapshot = ctx.index().snapshot();
    render_html(&ctx, render::HOME, &HomeView::from(&*snapshot))
}

pub async fn view(
    State(ctx): State<AppContext>,
    PageTitle(title): PageTitle,
) -> Result<Response> {
    match ctx.store().load(&title) {
        Ok(page) => {
            let html = render_html(&ctx, render::VIEW, &PageView::from(&page))?;
            Ok(html.into_response())
        }
        Err(WikiError::PageNotFound(_)) => Ok(Redirect::to(NOT_FOUND_PAGE).into_response()),
        Err(e) => Err(e),
    }
}

pub async fn edit(
    State(ctx): State<AppContext>,
    PageTitle(title): PageTitle,
) -> Result<Html<String>> {
    let page = ctx.load_or_blank(title)?;
    render_html(&ctx, render::EDIT, &PageView::from(&page))
}

pub async fn save(
    State(ctx): State<AppContext>,
    PageTitle(title): PageTitle,
    Form(form): Form<SaveForm>,
) -> Result<Redirect> {
    persist(&ctx, Page::new(title, form.body))
}

pub async fn new_page(State(ctx): State<AppContext>) -> Result<Html<String>> {
    render_html(&ctx, render::NEW, &context! {})
}

pub async fn create(State(ctx): State<AppContext>, form: NewPageForm) -> Result<Redirect> {
    persist(&ctx, Page::new(form.title, form.body))
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn persist(ctx: &AppContext, page: Page) -> Result<Redirect> {
    ctx.save_page(&page)?;
    let location = format!("/view/{}", render::urlencode(page.title.as_str())?);
    Ok(Redirect::to(&location))
}
