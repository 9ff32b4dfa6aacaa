//! server — HTTP front end (tiny_http) over a shared `RecordStore`.
//!
//! A fixed pool of worker threads pulls requests from one listening socket.
//! Workers share the store through `Arc`; the store's access guard is the only
//! point where they contend.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, error, info};
use tiny_http::{Header, Request, Response, Server};

use crate::config::{ServerConfig, StoreConfig};
use crate::store::{IndexedFileStore, RecordStore};

pub mod handler;
pub mod query;

pub use handler::{handle, status_for, ApiResponse};

/// Load `cfg.data` for serving. Load failures and an empty dataset are fatal:
/// no partial or empty index is ever served.
pub fn open_for_serving(cfg: &ServerConfig, store_cfg: StoreConfig) -> Result<IndexedFileStore> {
    let store = IndexedFileStore::open(&cfg.data, store_cfg)
        .with_context(|| format!("failed to load players data from {}", cfg.data.display()))?;

    let total = store.total_count();
    if total == 0 {
        bail!("players db {} is empty, service is aborted", cfg.data.display());
    }
    info!("{} players exist in source file {}", total, cfg.data.display());
    Ok(store)
}

/// Bind `cfg.addr` and serve until the process exits.
pub fn serve(store: Arc<dyn RecordStore>, cfg: &ServerConfig) -> Result<()> {
    let server = Server::http(&cfg.addr).map_err(|e| anyhow!("bind http at {}: {}", cfg.addr, e))?;
    let server = Arc::new(server);
    info!(
        "listening on {} ({} workers, {} records)",
        cfg.addr,
        cfg.workers,
        store.total_count()
    );

    let mut workers = Vec::with_capacity(cfg.workers);
    for i in 0..cfg.workers.max(1) {
        let server = Arc::clone(&server);
        let store = Arc::clone(&store);
        let cfg = cfg.clone();
        let h = thread::Builder::new()
            .name(format!("http-worker-{}", i))
            .spawn(move || worker_loop(&server, store.as_ref(), &cfg))
            .with_context(|| format!("spawn http worker {}", i))?;
        workers.push(h);
    }

    for h in workers {
        if h.join().is_err() {
            error!("http worker panicked");
        }
    }
    Ok(())
}

fn worker_loop(server: &Server, store: &dyn RecordStore, cfg: &ServerConfig) {
    loop {
        let rq = match server.recv() {
            Ok(rq) => rq,
            Err(e) => {
                error!("http recv error: {}", e);
                continue;
            }
        };
        let started = Instant::now();
        let method = rq.method().as_str().to_string();
        let url = rq.url().to_string();

        let resp = handle(store, cfg, &method, &url);
        debug!("{} {} -> {} in {:?}", method, url, resp.status, started.elapsed());
        respond(rq, resp);
    }
}

fn respond(rq: Request, resp: ApiResponse) {
    let mut out = Response::from_string(resp.body).with_status_code(resp.status);
    if let Ok(ct) = Header::from_bytes(&b"Content-Type"[..], resp.content_type.as_bytes()) {
        out.add_header(ct);
    }
    if let Err(e) = rq.respond(out) {
        debug!("respond failed: {}", e);
    }
}
