//! In-memory host type registry
//!
//! Holds defined type names and bound aliases. Unknown names can be handed to
//! an attached [`HookChain`], which is how a manager re-enters itself during
//! an existence check.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use alias_core::{AliasBinder, ExistenceCheck};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::hook::HookChain;

/// Host type registry
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Defined type names
    defined: RwLock<HashSet<String>>,
    /// Bound alias → concrete type
    aliases: RwLock<HashMap<String, String>>,
    /// Loader chain consulted for unknown names
    chain: RwLock<Option<Weak<HookChain>>>,
    /// Number of loading existence checks for unknown names
    load_checks: AtomicUsize,
}

impl TypeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a type
    pub fn define(&self, name: impl Into<String>) {
        self.defined.write().insert(name.into());
    }

    /// Defines several types
    pub fn define_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut defined = self.defined.write();
        defined.extend(names.into_iter().map(Into::into));
    }

    /// Returns true if `name` is a defined type, aliases excluded
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.read().contains(name)
    }

    /// Concrete type an alias is bound to
    pub fn target_of(&self, alias: &str) -> Option<String> {
        self.aliases.read().get(alias).cloned()
    }

    /// Snapshot of every bound alias
    pub fn bindings(&self) -> HashMap<String, String> {
        self.aliases.read().clone()
    }

    /// Consults `chain` for unknown names
    ///
    /// The chain is held weakly, so it may hold loaders that own this registry.
    pub fn attach_chain(&self, chain: &Arc<HookChain>) {
        *self.chain.write() = Some(Arc::downgrade(chain));
    }

    /// Stops consulting a loader chain
    pub fn detach_chain(&self) {
        *self.chain.write() = None;
    }

    /// Number of loading existence checks made for unknown names
    pub fn load_checks(&self) -> usize {
        self.load_checks.load(Ordering::Relaxed)
    }

    fn is_known(&self, name: &str) -> bool {
        self.is_defined(name) || self.aliases.read().contains_key(name)
    }

    fn concrete(&self, name: &str) -> String {
        self.aliases
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

impl ExistenceCheck for TypeRegistry {
    fn exists(&self, identifier: &str, allow_load: bool) -> bool {
        if self.is_known(identifier) {
            return true;
        }

        if !allow_load {
            return false;
        }

        self.load_checks.fetch_add(1, Ordering::Relaxed);

        // No registry lock may be held while loaders run
        let chain = self.chain.read().as_ref().and_then(Weak::upgrade);
        let Some(chain) = chain else {
            return false;
        };

        trace!("Loading unknown name '{}'", identifier);
        chain.load(identifier) && self.is_known(identifier)
    }
}

impl AliasBinder for TypeRegistry {
    fn bind(&self, target: &str, alias: &str) {
        if target == alias {
            return;
        }

        let concrete = self.concrete(target);
        if concrete == alias {
            return;
        }

        debug!("Binding '{}' to '{}'", alias, concrete);
        self.aliases.write().insert(alias.to_string(), concrete);
    }
}
