use anyhow::{Context, Result};
use std::path::PathBuf;

use PlayerDB::config::StoreConfig;
use PlayerDB::store::IndexedFileStore;

pub fn exec(data: PathBuf, key: String, json: bool) -> Result<()> {
    let store = IndexedFileStore::open(&data, StoreConfig::from_env())
        .with_context(|| format!("load {}", data.display()))?;

    match store.get(&key)? {
        Some(rec) => {
            if json {
                println!("{}", serde_json::to_string(&rec)?);
            } else {
                println!("FOUND '{}'", key);
                for (col, val) in rec.iter() {
                    println!("  {}: {}", col, val);
                }
            }
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("NOT FOUND '{}'", key);
            }
        }
    }
    Ok(())
}
