//! Memoized inventory.
//!
//! Holds the result of the last full scan. Cached reads return the same
//! `Arc` until a fresh scan replaces it or the cache is invalidated. The
//! lock is held across check-and-scan, so concurrent callers never scan
//! twice for one cached read.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use steam_inventory_core::AppRecord;

/// Shared inventory list.
pub type AppList = Arc<Vec<AppRecord>>;

#[derive(Debug, Default)]
pub struct InventoryCache {
    state: Mutex<Option<AppList>>,
}

impl InventoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<AppList>> {
        // The guarded value is replaced wholesale, never left half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached list when `cached` is set and a scan has happened;
    /// otherwise run `scan`, store its result, and return it.
    ///
    /// An empty scan result is cached like any other.
    pub fn get_or_scan(&self, cached: bool, scan: impl FnOnce() -> Vec<AppRecord>) -> AppList {
        let mut state = self.lock();
        if cached {
            if let Some(apps) = state.as_ref() {
                return Arc::clone(apps);
            }
        }
        let apps = Arc::new(scan());
        *state = Some(Arc::clone(&apps));
        apps
    }

    /// Current cached list, without scanning.
    pub fn peek(&self) -> Option<AppList> {
        self.lock().clone()
    }

    /// Drop the cached list; the next read scans.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn cached_reads_reuse_the_same_list() {
        let cache = InventoryCache::new();
        let scans = Cell::new(0);
        let scan = || {
            scans.set(scans.get() + 1);
            vec![AppRecord::native(1)]
        };

        let first = cache.get_or_scan(true, scan);
        let second = cache.get_or_scan(true, || panic!("should not rescan"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(scans.get(), 1);
    }

    #[test]
    fn fresh_reads_overwrite() {
        let cache = InventoryCache::new();
        let first = cache.get_or_scan(false, || vec![AppRecord::native(1)]);
        let second = cache.get_or_scan(false, || vec![AppRecord::native(2)]);
        assert!(!Arc::ptr_eq(&first, &second));
        let cached = cache.get_or_scan(true, Vec::new);
        assert!(Arc::ptr_eq(&second, &cached));
        assert_eq!(cached[0].app_id, 2);
    }

    #[test]
    fn empty_result_is_cached() {
        let cache = InventoryCache::new();
        let empty = cache.get_or_scan(true, Vec::new);
        assert!(empty.is_empty());
        let again = cache.get_or_scan(true, || vec![AppRecord::native(9)]);
        assert!(Arc::ptr_eq(&empty, &again));
    }

    #[test]
    fn invalidate_forces_rescan() {
        let cache = InventoryCache::new();
        let first = cache.get_or_scan(true, || vec![AppRecord::native(1)]);
        assert!(cache.peek().is_some_and(|apps| Arc::ptr_eq(&apps, &first)));
        cache.invalidate();
        assert!(cache.peek().is_none());
        let rescanned = cache.get_or_scan(true, || vec![AppRecord::native(3)]);
        assert_eq!(rescanned[0].app_id, 3);
        assert!(!Arc::ptr_eq(&first, &rescanned));
    }
}
