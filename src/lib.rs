#![allow(non_snake_case)]

// Ambient
pub mod config;
pub mod error;
pub mod lock;
pub mod metrics;

// Store core
pub mod record; // Record + naive delimited splitting
pub mod store;  // src/store/{mod,state,open,get,page}.rs

// HTTP front end
pub mod server; // src/server/{mod,handler,query}.rs

// Logger bootstrap shared by the binary
pub mod logging;

// Re-exports
pub use config::{ServerConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use record::Record;
pub use store::{IndexedFileStore, Page, RecordStore};
