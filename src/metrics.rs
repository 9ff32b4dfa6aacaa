//! Lightweight global metrics for PlayerDB.
//!
//! Thread-safe atomic counters, grouped by store component:
//! - Loader
//! - Point reader
//! - Range reader
//!
//! Rendered as Prometheus text by the server's `/metrics` route.

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Loader -----
static LOADS_TOTAL: AtomicU64 = AtomicU64::new(0);
static LOADS_FAILED: AtomicU64 = AtomicU64::new(0);
static RECORDS_INDEXED: AtomicU64 = AtomicU64::new(0);

// ----- Point reader -----
static LOOKUPS_TOTAL: AtomicU64 = AtomicU64::new(0);
static LOOKUP_HITS: AtomicU64 = AtomicU64::new(0);
static LOOKUP_MISSES: AtomicU64 = AtomicU64::new(0);

// ----- Range reader -----
static PAGES_SERVED: AtomicU64 = AtomicU64::new(0);
static PAGE_RECORDS_SERVED: AtomicU64 = AtomicU64::new(0);
static LIMIT_CLAMPS: AtomicU64 = AtomicU64::new(0);
static INVALID_PAGES: AtomicU64 = AtomicU64::new(0);

// ----- Both readers -----
static READ_ERRORS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub loads_total: u64,
    pub loads_failed: u64,
    pub records_indexed: u64,

    pub lookups_total: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,

    pub pages_served: u64,
    pub page_records_served: u64,
    pub limit_clamps: u64,
    pub invalid_pages: u64,

    pub read_errors: u64,
}

impl MetricsSnapshot {
    pub fn lookup_hit_ratio(&self) -> f64 {
        let total = self.lookup_hits + self.lookup_misses;
        if total == 0 {
            0.0
        } else {
            self.lookup_hits as f64 / total as f64
        }
    }

    pub fn avg_page_records(&self) -> f64 {
        if self.pages_served == 0 {
            0.0
        } else {
            self.page_records_served as f64 / self.pages_served as f64
        }
    }

    /// Prometheus text exposition (version 0.0.4).
    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();

        let ver = env!("CARGO_PKG_VERSION");
        push_metric(&mut out, "playerdb_build_info", "Build info.", "gauge",
            &format!("{{version=\"{}\"}} 1", ver));

        // --- Loader ---
        push_metric(&mut out, "playerdb_loads_total", "Index builds attempted.", "counter",
            &format!(" {}", self.loads_total));
        push_metric(&mut out, "playerdb_loads_failed_total", "Index builds aborted.", "counter",
            &format!(" {}", self.loads_failed));
        push_metric(&mut out, "playerdb_records_indexed", "Records indexed by successful loads.", "counter",
            &format!(" {}", self.records_indexed));

        // --- Point reader ---
        push_metric(&mut out, "playerdb_lookups_total", "Point lookups.", "counter",
            &format!(" {}", self.lookups_total));
        push_metric(&mut out, "playerdb_lookup_hits_total", "Point lookups that found a record.", "counter",
            &format!(" {}", self.lookup_hits));
        push_metric(&mut out, "playerdb_lookup_misses_total", "Point lookups for absent keys.", "counter",
            &format!(" {}", self.lookup_misses));
        push_metric(&mut out, "playerdb_lookup_hit_ratio", "Lookup hit ratio (percent).", "gauge",
            &format!(" {:.2}", self.lookup_hit_ratio() * 100.0));

        // --- Range reader ---
        push_metric(&mut out, "playerdb_pages_served_total", "Pages returned.", "counter",
            &format!(" {}", self.pages_served));
        push_metric(&mut out, "playerdb_page_records_served_total", "Records returned in pages.", "counter",
            &format!(" {}", self.page_records_served));
        push_metric(&mut out, "playerdb_limit_clamps_total", "Page sizes clamped to the maximum.", "counter",
            &format!(" {}", self.limit_clamps));
        push_metric(&mut out, "playerdb_invalid_pages_total", "Page requests outside [1, max_page].", "counter",
            &format!(" {}", self.invalid_pages));
        push_metric(&mut out, "playerdb_avg_page_records", "Average records per served page.", "gauge",
            &format!(" {:.2}", self.avg_page_records()));

        // --- Errors ---
        push_metric(&mut out, "playerdb_read_errors_total", "Seek/read/parse failures after load.", "counter",
            &format!(" {}", self.read_errors));

        out
    }
}

fn push_metric(out: &mut String, name: &str, help: &str, kind: &str, sample: &str) {
    out.push_str(&format!("# HELP {} {}\n", name, help));
    out.push_str(&format!("# TYPE {} {}\n", name, kind));
    out.push_str(&format!("{}{}\n", name, sample));
}

// ----- Recorders (Loader) -----
pub fn record_load(records: u64) {
    LOADS_TOTAL.fetch_add(1, Ordering::Relaxed);
    RECORDS_INDEXED.fetch_add(records, Ordering::Relaxed);
}

pub fn record_load_failed() {
    LOADS_TOTAL.fetch_add(1, Ordering::Relaxed);
    LOADS_FAILED.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Point reader) -----
pub fn record_lookup_hit() {
    LOOKUPS_TOTAL.fetch_add(1, Ordering::Relaxed);
    LOOKUP_HITS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_lookup_miss() {
    LOOKUPS_TOTAL.fetch_add(1, Ordering::Relaxed);
    LOOKUP_MISSES.fetch_add(1, Ordering::Relaxed);
}

/// Indexed key whose row could not be read back.
pub fn record_lookup_error() {
    LOOKUPS_TOTAL.fetch_add(1, Ordering::Relaxed);
    READ_ERRORS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Range reader) -----
pub fn record_page_served(records: usize) {
    PAGES_SERVED.fetch_add(1, Ordering::Relaxed);
    PAGE_RECORDS_SERVED.fetch_add(records as u64, Ordering::Relaxed);
}

pub fn record_limit_clamp() {
    LIMIT_CLAMPS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_invalid_page() {
    INVALID_PAGES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_read_error() {
    READ_ERRORS.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        loads_total: LOADS_TOTAL.load(Ordering::Relaxed),
        loads_failed: LOADS_FAILED.load(Ordering::Relaxed),
        records_indexed: RECORDS_INDEXED.load(Ordering::Relaxed),

        lookups_total: LOOKUPS_TOTAL.load(Ordering::Relaxed),
        lookup_hits: LOOKUP_HITS.load(Ordering::Relaxed),
        lookup_misses: LOOKUP_MISSES.load(Ordering::Relaxed),

        pages_served: PAGES_SERVED.load(Ordering::Relaxed),
        page_records_served: PAGE_RECORDS_SERVED.load(Ordering::Relaxed),
        limit_clamps: LIMIT_CLAMPS.load(Ordering::Relaxed),
        invalid_pages: INVALID_PAGES.load(Ordering::Relaxed),

        read_errors: READ_ERRORS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    LOADS_TOTAL.store(0, Ordering::Relaxed);
    LOADS_FAILED.store(0, Ordering::Relaxed);
    RECORDS_INDEXED.store(0, Ordering::Relaxed);

    LOOKUPS_TOTAL.store(0, Ordering::Relaxed);
    LOOKUP_HITS.store(0, Ordering::Relaxed);
    LOOKUP_MISSES.store(0, Ordering::Relaxed);

    PAGES_SERVED.store(0, Ordering::Relaxed);
    PAGE_RECORDS_SERVED.store(0, Ordering::Relaxed);
    LIMIT_CLAMPS.store(0, Ordering::Relaxed);
    INVALID_PAGES.store(0, Ordering::Relaxed);

    READ_ERRORS.store(0, Ordering::Relaxed);
}
