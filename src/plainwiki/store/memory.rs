use super::PageStore;
use crate::error::{Result, WikiError};
use crate::model::{Page, Title};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    pages: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn pages(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PageStore for InMemoryStore {
    fn load(&self, title: &Title) -> Result<Page> {
        self.pages()
            .get(title.as_str())
            .map(|body| Page::new(title.clone(), body.clone()))
            .ok_or_else(|| WikiError::PageNotFound(title.to_string()))
    }

    fn save(&self, page: &Page) -> Result<()> {
        self.pages()
            .insert(page.title.to_string(), page.body.clone());
        Ok(())
    }

    fn scan(&self) -> Result<Vec<String>> {
        Ok(self.pages().keys().cloned().collect())
    }
}

// --- Test Fixtures ---
