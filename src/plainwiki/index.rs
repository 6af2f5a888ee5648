//! # Page Index
//!
//! The home page lists every page in the store. Listing the data directory on
//! every request would be wasteful, so the list is kept as a [`PageIndex`]
//! snapshot that is rebuilt wholesale, never patched in place.
//!
//! ## Rebuilding
//!
//! A snapshot is built once at startup. After that, every successful save
//! sends a [`PageSaved`] notification to the indexing worker, which rescans
//! the store and publishes a new [`IndexSnapshot`]. Notifications that pile
//! up while a scan is running are coalesced into a single rescan, since one
//! full scan covers all of them. Rebuilds therefore never overlap, and the
//! newest published snapshot always comes from the newest scan.
//!
//! Readers call [`IndexHandle::snapshot`] and get an `Arc` to whatever was
//! published last. A snapshot can be stale for a moment after a save; that is
//! accepted.
//!
//! If a scan fails, the failure is logged and the previous snapshot stays
//! published. Callers are never failed by an index rebuild.
//!
//! ## Display names
//!
//! Each entry maps a title to the name shown on the home page. Today that is
//! the title itself, see [`display_name`].

use crate::error::{Result, WikiError};
use crate::store::PageStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// The name shown for a page in listings.
pub fn display_name(title: &str) -> String {
    title.to_string()
}

/// Title to display name, ordered by title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    entries: BTreeMap<String, String>,
}

impl PageIndex {
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = titles
            .into_iter()
            .map(|title| {
                let title = title.into();
                let name = display_name(&title);
                (title, name)
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    pub fn entries(&self) -> impl Iterator<Item = IndexEntry<'_>> {
        self.entries
            .iter()
            .map(|(title, name)| IndexEntry { title, name })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexEntry<'a> {
    pub title: &'a str,
    pub name: &'a str,
}

/// A published index together with when and how often it has been rebuilt.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    pub index: PageIndex,
    /// Number of successful rebuilds so far. Zero means nothing was ever built.
    pub generation: u64,
    pub built_at: Option<DateTime<Utc>>,
}

/// Rescan the store and produce the snapshot that replaces `previous`.
///
/// Returns `None` when the scan fails; the failure is logged and `previous`
/// should stay in place.
pub fn rebuild_index(store: &dyn PageStore, previous: &IndexSnapshot) -> Option<IndexSnapshot> {
    match store.build_index() {
        Ok(index) => {
            info!(pages = index.len(), generation = previous.generation + 1, "Indexed pages");
            Some(IndexSnapshot {
                index,
                generation: previous.generation + 1,
                built_at: Some(Utc::now()),
            })
        }
        Err(e) => {
            warn!(error = %e, "Failed to list pages, keeping previous index");
            None
        }
    }
}

/// Sent to the indexing worker after a page has been written.
#[derive(Debug, Clone)]
pub struct PageSaved {
    pub title: String,
}

/// Cheap, cloneable access to the published index and the worker's inbox.
#[derive(Clone)]
pub struct IndexHandle {
    notify: mpsc::UnboundedSender<PageSaved>,
    snapshot: watch::Receiver<Arc<IndexSnapshot>>,
}

impl IndexHandle {
    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Ask the worker for a rescan. Never blocks.
    pub fn page_saved(&self, title: &str) {
        let note = PageSaved {
            title: title.to_string(),
        };
        if self.notify.send(note).is_err() {
            warn!(title, "Indexer is not running, index will stay stale");
        }
    }

    /// Wait until a snapshot with at least `generation` has been published.
    pub async fn wait_for_generation(&self, generation: u64) -> Result<Arc<IndexSnapshot>> {
        let mut rx = self.snapshot.clone();
        let published = rx
            .wait_for(|s| s.generation >= generation)
            .await
            .map_err(|_| WikiError::IndexerStopped)?;
        Ok(Arc::clone(&published))
    }
}

/// Build the first snapshot inline, then start the worker that keeps it fresh.
///
/// The worker stops once every [`IndexHandle`] has been dropped.
pub fn spawn_indexer(store: Arc<dyn PageStore>) -> (IndexHandle, JoinHandle<()>) {
    let initial = rebuild_index(store.as_ref(), &IndexSnapshot::default()).unwrap_or_default();
    let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial));
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(run_worker(store, notify_rx, snapshot_tx));
    let handle = IndexHandle {
        notify: notify_tx,
        snapshot: snapshot_rx,
    };
    (handle, worker)
}

async fn run_worker(
    store: Arc<dyn PageStore>,
    mut inbox: mpsc::UnboundedReceiver<PageSaved>,
    published: watch::Sender<Arc<IndexSnapshot>>,
) {
    while let Some(first) = inbox.recv().await {
        let mut coalesced = 0usize;
        while inbox.try_recv().is_ok() {
            coalesced += 1;
        }
        debug!(title = %first.title, coalesced, "Rebuilding index");

        let previous = published.borrow().clone();
        let scan_store = Arc::clone(&store);
        let rebuilt =
            tokio::task::spawn_blocking(move || rebuild_index(scan_store.as_ref(), &previous))
                .await;

        match rebuilt {
            Ok(Some(next)) => {
                published.send_replace(Arc::new(next));
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "Index rebuild task failed"),
        }
    }
    debug!("Indexer stopped");
}
