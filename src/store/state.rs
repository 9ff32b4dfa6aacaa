//! store/state — shared store state behind the access guard.
//!
//! Everything a request touches (header, file-order index, the one file handle)
//! lives in `State` and is only reachable through `IndexedFileStore::guard()`.
//! The guard is store-wide: the backing file has a single cursor, so point and
//! range reads are serialized with each other and with the loader.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::lock::LockGuard;
use crate::record::{split_row, Record};

/// One indexed row: its key, the byte offset of its line start and the line's
/// length in bytes (terminator included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: String,
    pub offset: u64,
    pub len: u64,
}

/// Key -> offset map that also remembers file order.
/// `entries` is the canonical (pagination) order; `slots` maps a key to its entry.
#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<IndexEntry>,
    slots: HashMap<String, usize>,
}

impl Index {
    /// Append in file order. A key that is already indexed is handed back unchanged.
    pub fn insert(&mut self, entry: IndexEntry) -> std::result::Result<(), IndexEntry> {
        if self.slots.contains_key(&entry.key) {
            return Err(entry);
        }
        self.slots.insert(entry.key.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.slots.get(key).map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    #[inline]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

/// Open backing file plus the advisory lock that marks it as served.
pub(crate) struct Source {
    reader: BufReader<File>,
    lock: LockGuard,
    line: String,
}

impl Source {
    pub(crate) fn new(reader: BufReader<File>, lock: LockGuard) -> Self {
        Self {
            reader,
            lock,
            line: String::new(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        self.lock.path()
    }

    /// Seek to the entry's offset, read exactly one line and zip it against `header`.
    /// The line must still be `entry.len` bytes and carry `entry.key`, otherwise the
    /// file changed under the index.
    pub(crate) fn read_record_at(
        &mut self,
        header: &[String],
        key_pos: usize,
        entry: &IndexEntry,
        delimiter: char,
    ) -> Result<Record> {
        let (key, offset, len) = (entry.key.as_str(), entry.offset, entry.len);
        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| StoreError::read_io(key, format!("seek to offset {}", offset), e))?;

        self.line.clear();
        let n = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| StoreError::read_io(key, format!("read line at offset {}", offset), e))?;
        if n == 0 {
            return Err(StoreError::read(
                key,
                format!("unexpected end of file at offset {} (file truncated?)", offset),
            ));
        }
        if n as u64 != len {
            return Err(StoreError::read(
                key,
                format!(
                    "line at offset {} is {} bytes, indexed as {} (file changed after load)",
                    offset, n, len
                ),
            ));
        }

        let values = split_row(&self.line, delimiter);
        if values.len() != header.len() {
            return Err(StoreError::read(
                key,
                format!(
                    "expected {} fields at offset {}, found {}",
                    header.len(),
                    offset,
                    values.len()
                ),
            ));
        }
        if values[key_pos] != key {
            return Err(StoreError::read(
                key,
                format!(
                    "offset {} now holds key '{}' (file changed after load)",
                    offset, values[key_pos]
                ),
            ));
        }

        Ok(Record::from_parts(header, values))
    }
}

/// Published store state. Replaced wholesale by the loader, never mutated per request
/// (apart from the file cursor).
#[derive(Default)]
pub(crate) struct State {
    pub(crate) header: Vec<String>,
    pub(crate) key_pos: usize,
    pub(crate) index: Index,
    pub(crate) source: Option<Source>,
}

impl State {
    #[inline]
    pub(crate) fn total_count(&self) -> usize {
        self.index.len()
    }
}

/// Indexed record store over one flat delimited file.
///
/// Build with [`IndexedFileStore::open`] (new + load), or create empty with
/// [`IndexedFileStore::new`] and call `load` later. Share across threads behind `Arc`.
pub struct IndexedFileStore {
    pub(crate) cfg: StoreConfig,
    pub(crate) state: Mutex<State>,
}

impl IndexedFileStore {
    /// Empty store: no header, `total_count() == 0`, every page is invalid.
    pub fn new(cfg: StoreConfig) -> Self {
        Self {
            cfg,
            state: Mutex::new(State::default()),
        }
    }

    pub fn open(path: &Path, cfg: StoreConfig) -> Result<Self> {
        let store = Self::new(cfg);
        store.load(path)?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    /// Acquire the access guard. Released on drop, including on error paths.
    ///
    /// Poisoning is recovered: published state is immutable and every read
    /// re-seeks the cursor, so a panicked holder leaves nothing half-done.
    pub(crate) fn guard(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn total_count(&self) -> usize {
        self.guard().total_count()
    }

    pub fn header(&self) -> Vec<String> {
        self.guard().header.clone()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.guard().index.contains(key)
    }

    /// All keys in canonical (file) order.
    pub fn keys(&self) -> Vec<String> {
        self.guard().index.keys().map(str::to_string).collect()
    }

    /// Backing file of the currently published index, if loaded.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.guard().source.as_ref().map(|s| s.path().to_path_buf())
    }

    pub fn is_loaded(&self) -> bool {
        self.guard().source.is_some()
    }
}
