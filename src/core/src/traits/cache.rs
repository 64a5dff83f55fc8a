//! Resolution cache contract

use std::collections::HashMap;

/// Key/value store of resolved aliases
///
/// Implementations only touch their own store: they perform no existence
/// checks and no registry binding.
pub trait AliasCache: Send + Sync {
    /// Returns true if the cache holds an entry for `alias`
    fn has(&self, alias: &str) -> bool;

    /// Gets the cached target for `alias`
    fn get(&self, alias: &str) -> Option<String>;

    /// Snapshot of every cached entry
    fn all(&self) -> HashMap<String, String>;

    /// Stores a resolved alias, returns false if the entry could not be kept
    fn set(&self, alias: &str, target: &str) -> bool;

    /// Removes an entry, succeeds even if the alias was absent
    fn delete(&self, alias: &str) -> bool;

    /// Number of cached entries
    fn len(&self) -> usize {
        self.all().len()
    }

    /// Returns true if nothing is cached
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
