//! Miss-handling loader chain
//!
//! The host consults its loaders in order whenever it meets an unknown name.
//! Managers join the chain explicitly, there is no process-wide registration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alias_core::Loader;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Position of a newly registered loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Consulted before existing loaders
    #[default]
    Prepend,
    /// Consulted after existing loaders
    Append,
}

/// Handle for a registered loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Entry = (HookId, Arc<dyn Loader>);

/// Ordered chain of loaders
#[derive(Default)]
pub struct HookChain {
    loaders: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
}

impl HookChain {
    /// Creates an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a loader to the chain
    pub fn register(&self, loader: Arc<dyn Loader>, placement: Placement) -> HookId {
        let id = HookId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut loaders = self.loaders.write();

        match placement {
            Placement::Prepend => loaders.insert(0, (id, loader)),
            Placement::Append => loaders.push((id, loader)),
        }

        debug!("Registered loader {:?}, chain length {}", id, loaders.len());
        id
    }

    /// Removes a loader by handle
    pub fn unregister(&self, id: HookId) -> bool {
        let mut loaders = self.loaders.write();
        let before = loaders.len();
        loaders.retain(|(entry, _)| *entry != id);
        before != loaders.len()
    }

    /// Removes every registration of this loader instance
    pub fn unregister_loader(&self, loader: &Arc<dyn Loader>) -> bool {
        let target = Arc::as_ptr(loader) as *const ();
        let mut loaders = self.loaders.write();
        let before = loaders.len();
        loaders.retain(|(_, entry)| Arc::as_ptr(entry) as *const () != target);
        before != loaders.len()
    }

    /// Returns true if the handle is still registered
    pub fn is_registered(&self, id: HookId) -> bool {
        self.loaders.read().iter().any(|(entry, _)| *entry == id)
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.loaders.read().len()
    }

    /// Returns true if no loader is registered
    pub fn is_empty(&self) -> bool {
        self.loaders.read().is_empty()
    }

    /// Runs loaders in order until one makes `name` available
    pub fn load(&self, name: &str) -> bool {
        // Loaders may re-enter the chain
        let snapshot: Vec<Entry> = self.loaders.read().clone();

        for (id, loader) in snapshot {
            if loader.load(name) {
                trace!("Loader {:?} provided '{}'", id, name);
                return true;
            }
        }

        false
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<HookId> = self.loaders.read().iter().map(|(id, _)| *id).collect();
        f.debug_struct("HookChain").field("loaders", &ids).finish()
    }
}
