use clap::{Parser, Subcommand};
use std::path::PathBuf;

use PlayerDB::config::{DEFAULT_ADDR, DEFAULT_DATA_PATH, DEFAULT_LIMIT, DEFAULT_WORKERS};

/// PlayerDB: read-only player records over an indexed CSV file
#[derive(Parser, Debug)]
#[command(name = "playerdb", version, about = "PlayerDB CLI and HTTP service")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Index the data file and serve the HTTP API
    ///
    /// Routes:
    ///   GET /health
    ///   GET /api/players?page=1&limit=100
    ///   GET /api/players/{playerID}
    ///   GET /metrics
    Serve {
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: String,
        #[arg(long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
        /// Append log output to this file instead of stderr
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Print one record by key
    Get {
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
        #[arg(long)]
        key: String,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one page of records (file order)
    Page {
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_LIMIT as usize)]
        limit: usize,
        /// JSON output (same shape as GET /api/players)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print header, record count and page count
    Status {
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
