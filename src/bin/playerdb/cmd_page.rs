use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use PlayerDB::config::StoreConfig;
use PlayerDB::store::IndexedFileStore;

pub fn exec(data: PathBuf, page: usize, limit: usize, json: bool) -> Result<()> {
    let store = IndexedFileStore::open(&data, StoreConfig::from_env())
        .with_context(|| format!("load {}", data.display()))?;
    let key_column = store.config().key_column.clone();

    let p = store.page(page, limit)?;

    if json {
        let out = json!({
            "total_players": p.total_count,
            "page": p.number,
            "limit": p.limit,
            "players": p.records(),
        });
        println!("{}", out);
        return Ok(());
    }

    println!(
        "page {}/{} (limit {}, total {})",
        p.number, p.max_page, p.limit, p.total_count
    );
    if p.is_empty() {
        println!("(no items)");
    }
    for rec in p.records() {
        let key = rec.get(&key_column).unwrap_or("");
        let rest: Vec<String> = rec
            .iter()
            .filter(|(col, _)| *col != key_column)
            .map(|(col, val)| format!("{}={}", col, val))
            .collect();
        println!("{}: {}", key, rest.join(", "));
    }
    Ok(())
}
