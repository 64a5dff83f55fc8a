//! Volatile in-memory cache

use std::collections::HashMap;
use std::sync::Arc;

use alias_core::AliasCache;
use dashmap::DashMap;

use super::{CacheStats, StatCounters};

/// Stores resolved aliases in memory
///
/// Entries are lost when the cache is dropped. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    /// Resolved aliases (thread-safe)
    entries: Arc<DashMap<String, String>>,
    /// Lookup statistics
    stats: Arc<StatCounters>,
}

impl MemoryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-filled with entries
    pub fn with_entries<I, A, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        let cache = Self::new();
        for (alias, target) in entries {
            cache.entries.insert(alias.into(), target.into());
        }
        cache
    }

    /// Removes every entry and resets statistics
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.reset();
    }

    /// Returns lookup statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }
}

impl AliasCache for MemoryCache {
    fn has(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    fn get(&self, alias: &str) -> Option<String> {
        let found = self.entries.get(alias).map(|target| target.value().clone());
        self.stats.record(found.is_some());
        found
    }

    fn all(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn set(&self, alias: &str, target: &str) -> bool {
        self.entries.insert(alias.to_string(), target.to_string());
        true
    }

    fn delete(&self, alias: &str) -> bool {
        self.entries.remove(alias);
        true
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
