//! store/get — point reads by key.

use log::{debug, error};

use crate::error::{Result, StoreError};
use crate::metrics;
use crate::record::Record;

use super::state::{IndexedFileStore, State};

impl IndexedFileStore {
    /// Look up one record by its key.
    ///
    /// `Ok(None)` means the key is not indexed. A seek/read/parse failure for an
    /// indexed key is `Err(StoreError::Read)`, never `Ok(None)`.
    pub fn get(&self, key: &str) -> Result<Option<Record>> {
        let mut st = self.guard();
        let State {
            header,
            key_pos,
            index,
            source,
        } = &mut *st;

        let Some(entry) = index.get(key) else {
            metrics::record_lookup_miss();
            debug!("lookup '{}': not indexed", key);
            return Ok(None);
        };

        // An indexed key implies a published source.
        let Some(src) = source.as_mut() else {
            metrics::record_lookup_error();
            return Err(StoreError::read(key, "store has no open source"));
        };

        match src.read_record_at(header, *key_pos, entry, self.cfg.delimiter) {
            Ok(rec) => {
                metrics::record_lookup_hit();
                Ok(Some(rec))
            }
            Err(e) => {
                metrics::record_lookup_error();
                error!("error retrieving record by key: {}", e);
                Err(e)
            }
        }
    }
}
