//! store/open — the loader: one pass over the backing file builds the index.
//!
//! Offsets are captured before each line is consumed, so seeking to a stored
//! offset and reading one line reproduces that row exactly. A new state is built
//! off to the side and swapped in only when the whole pass succeeded; any failure
//! leaves the previously published state untouched.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, error, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::lock::try_shared_lock;
use crate::metrics;
use crate::record::{split_header, split_row};

use super::state::{Index, IndexEntry, IndexedFileStore, Source, State};

const UTF8_BOM: char = '\u{feff}';

impl IndexedFileStore {
    /// Scan `path`, build header/index/count and publish them atomically.
    /// Holds the access guard for the whole pass.
    pub fn load(&self, path: &Path) -> Result<()> {
        let started = Instant::now();
        info!("indexing records from {}", path.display());

        let mut st = self.guard();
        match build_state(path, &self.cfg) {
            Ok(fresh) => {
                let count = fresh.total_count();
                *st = fresh;
                metrics::record_load(count as u64);
                info!(
                    "indexed {} records from {} in {:?}",
                    count,
                    path.display(),
                    started.elapsed()
                );
                Ok(())
            }
            Err(e) => {
                metrics::record_load_failed();
                error!("error while indexing & counting records: {}", e);
                Err(e)
            }
        }
    }
}

fn build_state(path: &Path, cfg: &StoreConfig) -> Result<State> {
    if !path.exists() {
        return Err(StoreError::SourceNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| StoreError::indexing_io(path, "open source", e))?;
    let lock = try_shared_lock(path).map_err(|e| {
        StoreError::indexing_io(path, "shared lock on source (held exclusively elsewhere?)", e)
    })?;
    let mut reader = BufReader::new(file);

    // header
    let mut line = String::new();
    let n = reader
        .read_line(&mut line)
        .map_err(|e| StoreError::indexing_io(path, "read header line", e))?;
    if n == 0 {
        return Err(StoreError::indexing(path, "missing header line (empty file)"));
    }
    let header = split_header(line.trim_start_matches(UTF8_BOM), cfg.delimiter);
    validate_header(path, &header)?;
    let key_pos = header
        .iter()
        .position(|c| c == &cfg.key_column)
        .ok_or_else(|| {
            StoreError::indexing(
                path,
                format!("header has no key column '{}'", cfg.key_column),
            )
        })?;
    debug!("header {:?}, key column '{}' at {}", header, cfg.key_column, key_pos);

    // rows
    let mut index = Index::default();
    let mut pos = n as u64;
    let mut line_no: u64 = 1;
    loop {
        let offset = pos;
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| StoreError::indexing_io(path, format!("read line {}", line_no + 1), e))?;
        if n == 0 {
            break;
        }
        pos += n as u64;
        line_no += 1;

        if line.trim().is_empty() {
            continue;
        }

        let mut fields = split_row(&line, cfg.delimiter);
        if fields.len() != header.len() {
            return Err(StoreError::indexing(
                path,
                format!(
                    "line {}: expected {} fields, found {}",
                    line_no,
                    header.len(),
                    fields.len()
                ),
            ));
        }

        let entry = IndexEntry {
            key: fields.swap_remove(key_pos),
            offset,
            len: n as u64,
        };
        if let Err(dup) = index.insert(entry) {
            return Err(StoreError::indexing(
                path,
                format!("line {}: duplicate key '{}'", line_no, dup.key),
            ));
        }
    }

    Ok(State {
        header,
        key_pos,
        index,
        source: Some(Source::new(reader, lock)),
    })
}

fn validate_header(path: &Path, header: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(header.len());
    for (i, col) in header.iter().enumerate() {
        if col.is_empty() {
            return Err(StoreError::indexing(
                path,
                format!("header column {} has an empty name", i + 1),
            ));
        }
        if !seen.insert(col.as_str()) {
            return Err(StoreError::indexing(
                path,
                format!("header column '{}' appears more than once", col),
            ));
        }
    }
    Ok(())
}
