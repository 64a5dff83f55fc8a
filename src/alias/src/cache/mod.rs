//! Resolution cache implementations
//!
//! - [`MemoryCache`]: volatile, lives as long as the process
//! - [`FileCache`]: durable JSON file, loaded when opened and written on every change

mod memory;
mod file;

pub use memory::MemoryCache;
pub use file::FileCache;

use dashmap::DashMap;

/// Statistics about cache lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups that found an entry
    pub hits: usize,
    /// Number of lookups that found nothing
    pub misses: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Named lookup counters shared by the cache implementations
#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    counters: DashMap<&'static str, usize>,
}

impl StatCounters {
    pub(crate) fn record(&self, found: bool) {
        let key = if found { "hits" } else { "misses" };
        self.counters
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    pub(crate) fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            hits: self.get("hits"),
            misses: self.get("misses"),
            entries,
        }
    }

    pub(crate) fn reset(&self) {
        self.counters.clear();
    }

    fn get(&self, key: &str) -> usize {
        self.counters.get(key).map(|v| *v).unwrap_or(0)
    }
}
