use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use PlayerDB::config::{StoreConfig, DEFAULT_LIMIT};
use PlayerDB::store::IndexedFileStore;

pub fn exec(data: PathBuf, json: bool) -> Result<()> {
    let cfg = StoreConfig::from_env();
    let store = IndexedFileStore::open(&data, cfg.clone())
        .with_context(|| format!("load {}", data.display()))?;

    let header = store.header();
    let total = store.total_count();
    let limit = (DEFAULT_LIMIT as usize).min(cfg.max_page_size);
    let max_page = (total + limit - 1) / limit;

    if json {
        let out = json!({
            "path": data.display().to_string(),
            "key_column": cfg.key_column,
            "header": header,
            "total_count": total,
            "max_page_size": cfg.max_page_size,
            "default_limit": limit,
            "max_page": max_page,
        });
        println!("{}", out);
        return Ok(());
    }

    println!("PlayerDB status at {}", data.display());
    println!("  key column:    {}", cfg.key_column);
    println!("  header:        {}", header.join(", "));
    println!("  records:       {}", total);
    println!("  max page size: {}", cfg.max_page_size);
    println!("  pages @ {:>3}:   {}", limit, max_page);
    Ok(())
}
