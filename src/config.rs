//! Centralized configuration for PlayerDB.
//!
//! Two groups of tunables:
//! - `StoreConfig` — how the backing file is interpreted and how pages are bounded.
//!   Read by the store itself; `StoreConfig::from_env()` is what the binary uses.
//! - `ServerConfig` — HTTP front end (bind address, worker count, query defaults).
//!
//! Env overrides (store):
//! - PDB_KEY_COLUMN     (default "playerID")
//! - PDB_MAX_PAGE_SIZE  (default 200, values < 1 are ignored)
//! - PDB_DELIMITER      (default ",", exactly one char)
//!
//! Unparseable values are ignored and the default stays in effect.

use std::path::PathBuf;

pub const DEFAULT_KEY_COLUMN: &str = "playerID";
pub const DEFAULT_MAX_PAGE_SIZE: usize = 200;
pub const DEFAULT_DELIMITER: char = ',';

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 100;
pub const DEFAULT_DATA_PATH: &str = "data/players.csv";

/// Store tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Header column whose values are the unique record keys.
    /// Env: PDB_KEY_COLUMN
    pub key_column: String,

    /// Upper bound for page size; larger requests are clamped, not rejected.
    /// Env: PDB_MAX_PAGE_SIZE
    pub max_page_size: usize,

    /// Field delimiter. No quoting/escaping is recognized.
    /// Env: PDB_DELIMITER
    pub delimiter: char,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by PDB_* environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("PDB_KEY_COLUMN") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.key_column = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("PDB_MAX_PAGE_SIZE") {
            if let Ok(n) = v.trim().parse::<usize>() {
                if n > 0 {
                    cfg.max_page_size = n;
                }
            }
        }

        if let Ok(v) = std::env::var("PDB_DELIMITER") {
            let mut chars = v.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c != '\n' && c != '\r' {
                    cfg.delimiter = c;
                }
            }
        }

        cfg
    }

    pub fn with_key_column<S: Into<String>>(mut self, column: S) -> Self {
        self.key_column = column.into();
        self
    }

    /// Zero is bumped to 1 so page arithmetic never sees an empty window.
    pub fn with_max_page_size(mut self, n: usize) -> Self {
        self.max_page_size = n.max(1);
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// HTTP front end settings. Filled from CLI flags by the binary.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: String,
    pub workers: usize,
    pub data: PathBuf,
    pub default_page: i64,
    pub default_limit: i64,
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            workers: DEFAULT_WORKERS,
            data: PathBuf::from(DEFAULT_DATA_PATH),
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            log_file: None,
        }
    }
}

impl ServerConfig {
    pub fn with_addr<S: Into<String>>(mut self, addr: S) -> Self {
        self.addr = addr.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_data<P: Into<PathBuf>>(mut self, data: P) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }
}
