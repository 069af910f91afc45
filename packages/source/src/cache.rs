//! Explicit memoization of raw load results.
//!
//! Keyed by the full set of call arguments, so two renders with the
//! same source parameters reuse one record set instead of re-fetching.
//! Values are shared immutably; there is no eviction and no TTL — the
//! cache lives as long as the process. Concurrent cache misses may each
//! fetch; no single-flight guarantee is made.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crime_dash_models::IncidentRecord;

/// Identity of one raw load: source mode plus every parameter that
/// affects its result.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheKey {
    /// A local CSV snapshot.
    LocalFile(PathBuf),
    /// The paginated remote fetch over a date window.
    RemoteWindow {
        /// Base API URL.
        base_url: String,
        /// Window start literal.
        start: String,
        /// Window end literal.
        end: String,
    },
    /// The per-year evolution fetch.
    RemoteYearly {
        /// Base API URL.
        base_url: String,
        /// First year requested.
        start_year: i32,
        /// Last year requested (inclusive).
        end_year: i32,
    },
}

/// Process-lifetime cache of raw load results.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: BTreeMap<CacheKey, Arc<Vec<IncidentRecord>>>,
}

impl LoadCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the cached record set for `key`, if one was loaded.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<IncidentRecord>>> {
        let hit = self.entries.get(key).map(Arc::clone);
        if hit.is_some() {
            log::debug!("Load cache hit: {key:?}");
        }
        hit
    }

    /// Stores a load result and returns the shared handle. A later
    /// insert for the same key replaces the entry; existing handles
    /// keep the record set they observed.
    pub fn insert(&mut self, key: CacheKey, records: Vec<IncidentRecord>) -> Arc<Vec<IncidentRecord>> {
        let shared = Arc::new(records);
        self.entries.insert(key, Arc::clone(&shared));
        shared
    }

    /// Number of cached load results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crime_dash_models::IncidentRecord;

    use super::*;

    fn window_key(start: &str) -> CacheKey {
        CacheKey::RemoteWindow {
            base_url: "http://localhost/resource.csv".to_owned(),
            start: start.to_owned(),
            end: "2025-12-31T23:59:59".to_owned(),
        }
    }

    #[test]
    fn miss_then_hit_returns_same_records() {
        let mut cache = LoadCache::new();
        let key = window_key("2016-01-01T00:00:00");

        assert!(cache.get(&key).is_none());

        let stored = cache.insert(key.clone(), vec![IncidentRecord::empty()]);
        let fetched = cache.get(&key).unwrap();

        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(fetched.len(), 1);
    }

    #[test]
    fn distinct_arguments_are_distinct_entries() {
        let mut cache = LoadCache::new();

        cache.insert(window_key("2016-01-01T00:00:00"), Vec::new());
        cache.insert(window_key("2014-01-01T00:00:00"), Vec::new());
        cache.insert(CacheKey::LocalFile(PathBuf::from("./data/a.csv")), Vec::new());

        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn empty_load_is_still_a_hit() {
        let mut cache = LoadCache::new();
        let key = CacheKey::RemoteYearly {
            base_url: "http://localhost/resource.csv".to_owned(),
            start_year: 2001,
            end_year: 2024,
        };

        cache.insert(key.clone(), Vec::new());
        let hit = cache.get(&key).unwrap();
        assert!(hit.is_empty());
    }
}
