//! # Application Context
//!
//! Everything a request handler needs, built once at startup and cloned into
//! each request:
//!
//! - the [`PageStore`] pages are read from and written to
//! - the compiled [`Templates`]
//! - an [`IndexHandle`] for reading the page index and reporting saves
//!
//! There is no process-wide mutable state. Tests build their own context
//! around an in-memory or temporary-directory store.

use crate::error::{Result, WikiError};
use crate::index::{spawn_indexer, IndexHandle};
use crate::model::{Page, Title};
use crate::render::Templates;
use crate::store::PageStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct AppContext {
    store: Arc<dyn PageStore>,
    templates: Arc<Templates>,
    index: IndexHandle,
}

impl AppContext {
    pub fn new(store: Arc<dyn PageStore>, templates: Templates, index: IndexHandle) -> Self {
        Self {
            store,
            templates: Arc::new(templates),
            index,
        }
    }

    /// Build the initial index and start the indexing worker.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(store: Arc<dyn PageStore>, templates: Templates) -> (Self, JoinHandle<()>) {
        let (index, worker) = spawn_indexer(Arc::clone(&store));
        (Self::new(store, templates, index), worker)
    }

    pub fn store(&self) -> &dyn PageStore {
        self.store.as_ref()
    }

    pub fn index(&self) -> &IndexHandle {
        &self.index
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.templates.render(name, data)
    }

    /// Load a page, or a blank one if it was never saved.
    pub fn load_or_blank(&self, title: Title) -> Result<Page> {
        match self.store.load(&title) {
            Ok(page) => Ok(page),
            Err(WikiError::PageNotFound(_)) => Ok(Page::blank(title)),
            Err(e) => Err(e),
        }
    }

    /// Persist a page and schedule an index rebuild.
    pub fn save_page(&self, page: &Page) -> Result<()> {
        self.store.save(page)?;
        self.index.page_saved(page.title.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    fn context() -> AppContext {
        let store: Arc<dyn PageStore> = Arc::new(InMemoryStore::new());
        let (ctx, _worker) = AppContext::start(store, Templates::builtin().unwrap());
        ctx
    }

    #[tokio::test]
    async fn test_load_or_blank_for_missing_page() {
        let ctx = context();
        let page = ctx.load_or_blank(title("NoSuchPage")).unwrap();
        assert_eq!(page.title.as_str(), "NoSuchPage");
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_save_page_persists_and_reindexes() {
        let ctx = context();
        ctx.save_page(&Page::new(title("Home"), "Hello")).unwrap();

        assert_eq!(ctx.store().load(&title("Home")).unwrap().body, b"Hello");
        let snapshot = ctx.index().wait_for_generation(2).await.unwrap();
        assert!(snapshot.index.contains("Home"));
    }

    #[tokio::test]
    async fn test_load_missing_page_through_store() {
        let ctx = context();
        assert!(matches!(
            ctx.store().load(&title("Ghost")),
            Err(WikiError::PageNotFound(_))
        ));
    }
}
