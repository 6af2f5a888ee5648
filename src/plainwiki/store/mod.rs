//! # Storage Layer
//!
//! Pages are persisted through the [`PageStore`] trait so that handlers never
//! touch the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One file per page: `<data_dir>/<title>.txt`
//!   - Configurable file extension
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!
//! ## Storage Format
//!
//! ```text
//! data/
//! ├── Home.txt
//! ├── Shopping list.txt
//! └── Ideas.txt
//! ```
//!
//! The file body is the page body, byte for byte. There is no metadata file:
//! the index is rebuilt by listing the directory.
//!
//! Writes are plain `write` calls. A crash mid-write can leave a truncated
//! page behind; there is no journal or lock file.

use crate::error::Result;
use crate::index::PageIndex;
use crate::model::{Page, Title};

pub mod fs;
pub mod memory;

/// Abstract interface for page storage.
///
/// Implementations are shared between request tasks and the indexing worker,
/// so they must be usable through `&self` from several threads at once.
pub trait PageStore: Send + Sync {
    /// Read a whole page. Fails with `PageNotFound` when nothing is stored
    /// under `title`.
    fn load(&self, title: &Title) -> Result<Page>;

    /// Create or overwrite a page.
    fn save(&self, page: &Page) -> Result<()>;

    /// Titles of every page currently stored, in no particular order.
    fn scan(&self) -> Result<Vec<String>>;

    /// Build a fresh index from a full scan of the store.
    fn build_index(&self) -> Result<PageIndex> {
        Ok(PageIndex::from_titles(self.scan()?))
    }
}
