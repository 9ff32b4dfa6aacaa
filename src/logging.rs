//! Logger bootstrap (env_logger).
//!
//! Level comes from RUST_LOG, otherwise `info`. Example: RUST_LOG=debug playerdb serve ...
//! With a log file, output is appended there instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use env_logger::{Builder, Env, Target};

pub fn init_logger(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| anyhow!("init logger: {}", e))
}
