//! Store error taxonomy.
//!
//! Load-time kinds (`SourceNotFound`, `Indexing`) are fatal for the process;
//! request-time kinds (`Read`, `InvalidPage`, `InvalidLimit`) are surfaced to the
//! caller and leave the store usable. A missing key is not an error at all:
//! lookups return `Ok(None)`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file does not exist at load time.
    #[error("source db file '{}' does not exist", .0.display())]
    SourceNotFound(PathBuf),

    /// Load aborted; nothing was published.
    #[error("indexing {}: {reason}", .path.display())]
    Indexing {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Seek/read/parse failed for a key that is present in the index.
    #[error("read record '{key}': {reason}")]
    Read {
        key: String,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("Invalid 'page' value {page}. Must be between 1 and {max_page}.")]
    InvalidPage { page: usize, max_page: usize },

    #[error("Invalid 'limit' value {0}. Must be greater than 0.")]
    InvalidLimit(usize),
}

impl StoreError {
    pub(crate) fn indexing(path: &std::path::Path, reason: impl Into<String>) -> Self {
        StoreError::Indexing {
            path: path.to_path_buf(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn indexing_io(path: &std::path::Path, reason: impl Into<String>, err: io::Error) -> Self {
        StoreError::Indexing {
            path: path.to_path_buf(),
            reason: reason.into(),
            source: Some(err),
        }
    }

    pub(crate) fn read(key: &str, reason: impl Into<String>) -> Self {
        StoreError::Read {
            key: key.to_string(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn read_io(key: &str, reason: impl Into<String>, err: io::Error) -> Self {
        StoreError::Read {
            key: key.to_string(),
            reason: reason.into(),
            source: Some(err),
        }
    }

    /// True for failures that only happen while loading and must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::SourceNotFound(_) | StoreError::Indexing { .. })
    }

    /// True for caller mistakes (bad page/limit) as opposed to store faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidPage { .. } | StoreError::InvalidLimit(_))
    }
}
