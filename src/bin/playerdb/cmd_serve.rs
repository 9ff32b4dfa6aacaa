use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use PlayerDB::config::{ServerConfig, StoreConfig};
use PlayerDB::server;

pub fn exec(data: PathBuf, addr: String, workers: usize, log_file: Option<PathBuf>) -> Result<()> {
    let cfg = ServerConfig::default()
        .with_data(data)
        .with_addr(addr)
        .with_workers(workers)
        .with_log_file(log_file);

    let store = server::open_for_serving(&cfg, StoreConfig::from_env())?;
    server::serve(Arc::new(store), &cfg)
}
