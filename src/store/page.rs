//! store/page — page-sliced reads over the canonical (file) order.
//!
//! Bounds arithmetic lives in [`plan_page`] (pure, no I/O); [`IndexedFileStore::page`]
//! applies it under the guard and reads each record in the window by offset.
//! Pages are materialized per call; nothing is carried between calls.

use log::{error, warn};

use crate::error::{Result, StoreError};
use crate::metrics;
use crate::record::Record;

use super::state::{IndexedFileStore, State};

/// Validated page window over `0..total_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub page: usize,
    /// Effective page size after clamping.
    pub limit: usize,
    /// True when the requested size exceeded the maximum.
    pub clamped: bool,
    pub max_page: usize,
    pub start: usize,
    /// Exclusive, never past `total_count`.
    pub end: usize,
}

impl PagePlan {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Validate `page`/`limit` against `total_count`.
///
/// Order: reject a zero limit, clamp to `max_page_size`, then require
/// `1 <= page <= ceil(total_count / limit)`. With `total_count == 0` there is no
/// valid page.
pub fn plan_page(page: usize, limit: usize, total_count: usize, max_page_size: usize) -> Result<PagePlan> {
    if limit == 0 {
        return Err(StoreError::InvalidLimit(limit));
    }
    let max_page_size = max_page_size.max(1);
    let clamped = limit > max_page_size;
    let limit = limit.min(max_page_size);

    let max_page = total_count / limit + usize::from(total_count % limit != 0);
    if page < 1 || page > max_page {
        return Err(StoreError::InvalidPage { page, max_page });
    }

    let start = (page - 1) * limit;
    let end = (start + limit).min(total_count);
    Ok(PagePlan {
        page,
        limit,
        clamped,
        max_page,
        start,
        end,
    })
}

/// One materialized page. Iterating it yields records in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Effective page size (after clamping).
    pub limit: usize,
    pub max_page: usize,
    pub total_count: usize,
    pub records: Vec<Record>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_last(&self) -> bool {
        self.number == self.max_page
    }
}

impl IntoIterator for Page {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl IndexedFileStore {
    /// Read page `page` (1-based) of size `limit`.
    ///
    /// Oversized limits are clamped to `max_page_size` and logged, not rejected.
    /// Any row failing to read aborts the whole page with `StoreError::Read`.
    pub fn page(&self, page: usize, limit: usize) -> Result<Page> {
        let mut st = self.guard();
        let State {
            header,
            key_pos,
            index,
            source,
        } = &mut *st;
        let total_count = index.len();

        let plan = match plan_page(page, limit, total_count, self.cfg.max_page_size) {
            Ok(p) => p,
            Err(e) => {
                if let StoreError::InvalidPage { page, max_page } = &e {
                    metrics::record_invalid_page();
                    warn!("Invalid 'page' value: {}. Total pages available: {}.", page, max_page);
                }
                return Err(e);
            }
        };
        if plan.clamped {
            metrics::record_limit_clamp();
            warn!(
                "Invalid 'limit' value: {}. Set to default max: {}.",
                limit, plan.limit
            );
        }

        let window = &index.entries()[plan.start..plan.end];
        let mut records = Vec::with_capacity(window.len());
        if !plan.is_empty() {
            let Some(src) = source.as_mut() else {
                metrics::record_read_error();
                return Err(StoreError::read(&window[0].key, "store has no open source"));
            };
            for entry in window {
                match src.read_record_at(header, *key_pos, entry, self.cfg.delimiter) {
                    Ok(rec) => records.push(rec),
                    Err(e) => {
                        metrics::record_read_error();
                        error!("page {} aborted: {}", plan.page, e);
                        return Err(e);
                    }
                }
            }
        }

        metrics::record_page_served(records.len());
        Ok(Page {
            number: plan.page,
            limit: plan.limit,
            max_page: plan.max_page,
            total_count,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_window() {
        let p = plan_page(1, 2, 5, 200).unwrap();
        assert_eq!((p.start, p.end, p.max_page), (0, 2, 3));
        let p = plan_page(3, 2, 5, 200).unwrap();
        assert_eq!((p.start, p.end, p.len()), (4, 5, 1));
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let p = plan_page(2, 2, 4, 200).unwrap();
        assert_eq!(p.max_page, 2);
        assert!(matches!(
            plan_page(3, 2, 4, 200),
            Err(StoreError::InvalidPage { page: 3, max_page: 2 })
        ));
    }

    #[test]
    fn page_zero_is_invalid() {
        assert!(matches!(
            plan_page(0, 10, 50, 200),
            Err(StoreError::InvalidPage { page: 0, .. })
        ));
    }

    #[test]
    fn empty_store_has_no_pages() {
        for page in 0..3 {
            assert!(matches!(
                plan_page(page, 10, 0, 200),
                Err(StoreError::InvalidPage { max_page: 0, .. })
            ));
        }
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let p = plan_page(1, 500, 1000, 200).unwrap();
        assert!(p.clamped);
        assert_eq!(p.limit, 200);
        assert_eq!(p.max_page, 5);
        assert_eq!(p.len(), 200);

        let p = plan_page(1, 200, 1000, 200).unwrap();
        assert!(!p.clamped);
    }

    #[test]
    fn max_page_uses_clamped_limit() {
        // 450 rows at 200/page -> 3 pages, even though 500 was asked for.
        assert!(plan_page(3, 500, 450, 200).is_ok());
        assert!(plan_page(4, 500, 450, 200).is_err());
    }

    #[test]
    fn zero_limit_rejected_before_arithmetic() {
        assert!(matches!(plan_page(1, 0, 10, 200), Err(StoreError::InvalidLimit(0))));
        assert!(matches!(plan_page(1, 0, 0, 200), Err(StoreError::InvalidLimit(0))));
    }
}
