//! store — indexed record store over a flat delimited file.
//!
//! Layout:
//! - state — shared state, the index and the access guard
//! - open  — loader (one pass, offset capture, atomic publish)
//! - get   — point reader
//! - page  — range reader and page arithmetic
//!
//! Callers (the HTTP layer, the CLI) depend on the [`RecordStore`] capability,
//! not on the concrete backend.

use std::path::Path;

use crate::error::Result;
use crate::record::Record;

pub mod get;
pub mod open;
pub mod page;
pub mod state;

pub use page::{plan_page, Page, PagePlan};
pub use state::{Index, IndexEntry, IndexedFileStore};

/// Read-only record store capability.
pub trait RecordStore: Send + Sync {
    /// Build (or rebuild) the index from `path`. Publishes only on success.
    fn load(&self, path: &Path) -> Result<()>;

    /// `Ok(None)` when the key is not present.
    fn get_by_key(&self, key: &str) -> Result<Option<Record>>;

    /// 1-based page of at most `limit` records (limit clamped to the store maximum).
    fn get_page(&self, page: usize, limit: usize) -> Result<Page>;

    fn total_count(&self) -> usize;

    fn header(&self) -> Vec<String>;
}

impl RecordStore for IndexedFileStore {
    fn load(&self, path: &Path) -> Result<()> {
        IndexedFileStore::load(self, path)
    }

    fn get_by_key(&self, key: &str) -> Result<Option<Record>> {
        self.get(key)
    }

    fn get_page(&self, page: usize, limit: usize) -> Result<Page> {
        self.page(page, limit)
    }

    fn total_count(&self) -> usize {
        IndexedFileStore::total_count(self)
    }

    fn header(&self) -> Vec<String> {
        IndexedFileStore::header(self)
    }
}
