//! Alias resolution engine
//!
//! Orchestrates the cache and the three rule strategies with a recursion
//! guard, then binds the alias in the host registry and records it in the
//! cache.
//!
//! # Pipeline
//!
//! ```text
//! resolve(alias)
//!   → recursion guard ──(in flight)──────────────→ false
//!   → cache ──(hit)──────────────────────────────→ bind
//!   → literal → namespace → pattern ──(none)─────→ false
//!   → existence re-check → bind → cache store ──→ true
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use alias_resolver::{AliasManager, TypeRegistry};
//!
//! let registry = Arc::new(TypeRegistry::new());
//! registry.define("Acme\\Geometry\\Shape");
//!
//! let mut manager = AliasManager::new(registry.clone());
//! manager.alias("Shape", "Acme\\Geometry\\Shape");
//!
//! assert!(manager.resolve("Shape"));
//! assert_eq!(registry.target_of("Shape").as_deref(), Some("Acme\\Geometry\\Shape"));
//! assert!(!manager.resolve("Unknown"));
//! ```

pub mod metrics;
pub mod resolving;

pub use metrics::{EngineMetrics, MetricsCollector};
pub use resolving::{ResolvingGuard, ResolvingSet};

use std::fmt;
use std::sync::Arc;

use alias_core::types::{join_namespace, strip_namespace_prefix};
use alias_core::{AliasBinder, AliasCache, AliasName, ExistenceCheck, Loader, Target};
use tracing::{debug, info, trace};

use crate::cache::MemoryCache;
use crate::error::Result;
use crate::hook::{HookChain, HookId, Placement};
use crate::pattern::{PatternEntry, Translation};
use crate::table::AliasTable;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Re-check a candidate's existence right before binding it
    pub verify_on_bind: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            verify_on_bind: true,
        }
    }
}

/// Where a resolved target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Previously resolved and cached
    Cache,
    /// Literal alias
    Literal,
    /// Namespace rewrite
    Namespace,
    /// Wildcard pattern
    Pattern,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cache => "cache",
            Self::Literal => "literal",
            Self::Namespace => "namespace",
            Self::Pattern => "pattern",
        };
        f.write_str(name)
    }
}

/// A target found for an alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Requested alias
    pub alias: AliasName,
    /// Concrete target
    pub target: Target,
    /// Strategy that produced the target
    pub strategy: Strategy,
}

impl Resolution {
    fn new(alias: &str, target: Target, strategy: Strategy) -> Self {
        Self {
            alias: alias.to_string(),
            target,
            strategy,
        }
    }
}

/// Alias resolution engine
///
/// Rules are registered through `&mut self` and are fixed while resolutions
/// run. Resolution takes `&self` so that existence checks may re-enter the
/// manager (through the host's loader chain) while an outer resolution is
/// still in flight.
///
/// Precedence is strict: cache, then literal, then namespace, then pattern.
/// Resolution never fails with an error; it returns `false`.
pub struct AliasManager {
    /// Alias rules
    table: AliasTable,

    /// Resolved alias cache
    cache: Arc<dyn AliasCache>,

    /// Host existence predicate
    existence: Arc<dyn ExistenceCheck>,

    /// Host alias binding
    binder: Arc<dyn AliasBinder>,

    /// Names in flight on the current call stack
    resolving: ResolvingSet,

    /// Resolution counters
    metrics: Option<MetricsCollector>,

    /// Engine configuration
    config: ManagerConfig,
}

impl AliasManager {
    /// Creates a manager over a host registry, with an in-memory cache
    pub fn new<R>(registry: Arc<R>) -> Self
    where
        R: ExistenceCheck + AliasBinder + 'static,
    {
        Self::with_config(registry, None, ManagerConfig::default())
    }

    /// Creates a manager with the given cache
    pub fn with_cache<R>(registry: Arc<R>, cache: Arc<dyn AliasCache>) -> Self
    where
        R: ExistenceCheck + AliasBinder + 'static,
    {
        Self::with_config(registry, Some(cache), ManagerConfig::default())
    }

    /// Creates a manager with an optional cache and explicit configuration
    ///
    /// Without a cache an in-memory one is used.
    pub fn with_config<R>(
        registry: Arc<R>,
        cache: Option<Arc<dyn AliasCache>>,
        config: ManagerConfig,
    ) -> Self
    where
        R: ExistenceCheck + AliasBinder + 'static,
    {
        let existence: Arc<dyn ExistenceCheck> = registry.clone();
        let binder: Arc<dyn AliasBinder> = registry;
        Self::from_parts(existence, binder, cache, config)
    }

    /// Creates a manager from separate collaborators
    pub fn from_parts(
        existence: Arc<dyn ExistenceCheck>,
        binder: Arc<dyn AliasBinder>,
        cache: Option<Arc<dyn AliasCache>>,
        config: ManagerConfig,
    ) -> Self {
        let cache: Arc<dyn AliasCache> = match cache {
            Some(cache) => cache,
            None => Arc::new(MemoryCache::new()),
        };

        let metrics = if config.enable_metrics {
            Some(MetricsCollector::new())
        } else {
            None
        };

        info!(
            "AliasManager initialized with metrics={}, verify_on_bind={}, cached_entries={}",
            config.enable_metrics,
            config.verify_on_bind,
            cache.len()
        );

        Self {
            table: AliasTable::new(),
            cache,
            existence,
            binder,
            resolving: ResolvingSet::new(),
            metrics,
            config,
        }
    }

    // ------------------------------------------------------------------------
    // Rule registration
    // ------------------------------------------------------------------------

    /// Registers a literal alias
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.table.set_literal(alias, target);
        self
    }

    /// Registers several literal aliases, later entries win
    pub fn alias_many<I, A, T>(&mut self, aliases: I) -> &mut Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        self.table.set_literals(aliases);
        self
    }

    /// Removes literal aliases
    pub fn remove_alias<I, S>(&mut self, aliases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table.remove_literals(aliases);
        self
    }

    /// Registers a pattern alias
    pub fn alias_pattern(
        &mut self,
        pattern: &str,
        translation: impl Into<Translation>,
    ) -> &mut Self {
        self.table.add_pattern(pattern, translation);
        self
    }

    /// Registers a pattern alias, failing if the pattern cannot compile
    pub fn try_alias_pattern(
        &mut self,
        pattern: &str,
        translation: impl Into<Translation>,
    ) -> Result<&mut Self> {
        self.table.try_add_pattern(pattern, translation)?;
        Ok(self)
    }

    /// Registers several pattern aliases in order
    pub fn alias_patterns<I, P, T>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: Into<Translation>,
    {
        self.table.add_patterns(patterns);
        self
    }

    /// Removes a pattern alias, optionally only with a matching translation
    pub fn remove_alias_pattern(
        &mut self,
        pattern: &str,
        translation: Option<&Translation>,
    ) -> &mut Self {
        self.table.remove_pattern(pattern, translation);
        self
    }

    /// Registers a namespace alias
    pub fn alias_namespace(&mut self, from: &str, to: &str) -> &mut Self {
        self.table.add_namespace(from, to);
        self
    }

    /// Removes namespace aliases by their `from` namespace
    pub fn remove_namespace_alias<I, S>(&mut self, froms: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table.remove_namespaces(froms);
        self
    }

    /// Alias rules
    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Mutable alias rules
    pub fn table_mut(&mut self) -> &mut AliasTable {
        &mut self.table
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Resolves an alias and binds it in the host registry
    ///
    /// Returns true once the alias is usable. Unknown aliases, candidates that
    /// do not exist, and recursive attempts all return false without side
    /// effects.
    pub fn resolve(&self, alias: &str) -> bool {
        self.resolve_target(alias).is_some()
    }

    /// Resolves an alias like [`resolve`](Self::resolve), returning the bound target
    pub fn resolve_target(&self, alias: &str) -> Option<String> {
        let Some(resolution) = self.lookup(alias) else {
            debug!("Alias '{}' not resolved", alias);
            self.record(|m| m.record_failed());
            return None;
        };

        let Resolution {
            target, strategy, ..
        } = resolution;

        if strategy != Strategy::Cache
            && self.config.verify_on_bind
            && !self.existence.exists(&target, true)
        {
            debug!("Target '{}' for alias '{}' vanished before binding", target, alias);
            self.record(|m| m.record_failed());
            return None;
        }

        self.binder.bind(&target, alias);

        if !self.cache.has(alias) && !self.cache.set(alias, &target) {
            debug!("Resolution of '{}' was not kept in the cache", alias);
        }

        debug!("Resolved '{}' to '{}' via {}", alias, target, strategy);
        self.record(|m| m.record_resolved(strategy));

        Some(target)
    }

    /// Finds the target for an alias without binding or caching it
    ///
    /// Candidates from literal, namespace, and pattern rules are checked for
    /// existence; cached targets are trusted. Namespace and pattern candidates
    /// are held in flight during their check, so only literal targets (a
    /// finite set) may be resolved by re-entering this manager.
    pub fn lookup(&self, alias: &str) -> Option<Resolution> {
        let Some(_guard) = self.resolving.enter(alias) else {
            debug!("Skipping recursive resolution of '{}'", alias);
            self.record(|m| m.record_recursion_abort());
            return None;
        };

        if let Some(target) = self.cached_target(alias) {
            trace!("Cache hit for '{}'", alias);
            return Some(Resolution::new(alias, target, Strategy::Cache));
        }

        if let Some(target) = self.resolve_literal(alias) {
            return Some(Resolution::new(alias, target, Strategy::Literal));
        }

        if let Some(target) = self.resolve_namespace(alias) {
            return Some(Resolution::new(alias, target, Strategy::Namespace));
        }

        self.resolve_pattern(alias)
            .map(|target| Resolution::new(alias, target, Strategy::Pattern))
    }

    fn cached_target(&self, alias: &str) -> Option<String> {
        if !self.cache.has(alias) {
            return None;
        }
        self.cache.get(alias).filter(|target| !target.is_empty())
    }

    fn resolve_literal(&self, alias: &str) -> Option<String> {
        let target = self.table.literal(alias)?;

        if self.existence.exists(target, true) {
            Some(target.to_string())
        } else {
            trace!("Literal target '{}' for '{}' does not exist", target, alias);
            None
        }
    }

    fn resolve_namespace(&self, alias: &str) -> Option<String> {
        for namespace in self.table.namespaces() {
            let Some(name) = strip_namespace_prefix(alias, &namespace.to) else {
                continue;
            };

            let candidate = join_namespace(&namespace.from, name);

            // The candidate must not resolve back through this manager
            let _guard = self.resolving.push(&candidate);

            if self.existence.exists(&candidate, true) {
                return Some(candidate);
            }

            trace!("Namespace candidate '{}' for '{}' does not exist", candidate, alias);
        }

        None
    }

    fn resolve_pattern(&self, alias: &str) -> Option<String> {
        let exact = self.table.pattern(alias);

        if let Some(target) = exact.and_then(|entry| self.try_pattern(entry, alias)) {
            return Some(target);
        }

        self.table
            .patterns()
            .filter(|entry| entry.pattern() != alias)
            .find_map(|entry| self.try_pattern(entry, alias))
    }

    fn try_pattern(&self, entry: &PatternEntry, alias: &str) -> Option<String> {
        let candidate = entry.translate(alias)?;

        // Rewrites may lengthen the name, so the candidate must not resolve
        // back through this manager either
        let _guard = self.resolving.push(&candidate);

        if self.existence.exists(&candidate, true) {
            Some(candidate)
        } else {
            trace!(
                "Pattern '{}' candidate '{}' for '{}' does not exist",
                entry.pattern(),
                candidate,
                alias
            );
            None
        }
    }

    // ------------------------------------------------------------------------
    // Cache, metrics, and hooks
    // ------------------------------------------------------------------------

    /// Resolved alias cache
    pub fn cache(&self) -> &Arc<dyn AliasCache> {
        &self.cache
    }

    /// Drops a cached resolution so the next lookup walks the rules again
    pub fn forget(&self, alias: &str) -> bool {
        self.cache.delete(alias)
    }

    /// Names currently in flight
    pub fn resolving(&self) -> &ResolvingSet {
        &self.resolving
    }

    /// Current metrics, if enabled
    pub fn metrics(&self) -> Option<EngineMetrics> {
        self.metrics.as_ref().map(MetricsCollector::get_metrics)
    }

    /// Engine configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Adds this manager to a loader chain
    pub fn register(self: &Arc<Self>, chain: &HookChain, placement: Placement) -> HookId {
        let loader: Arc<dyn Loader> = self.clone();
        let id = chain.register(loader, placement);
        debug!("AliasManager registered as loader {:?} ({:?})", id, placement);
        id
    }

    /// Removes this manager from a loader chain
    pub fn unregister(self: &Arc<Self>, chain: &HookChain) -> bool {
        let loader: Arc<dyn Loader> = self.clone();
        chain.unregister_loader(&loader)
    }

    fn record(&self, f: impl FnOnce(&MetricsCollector)) {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }
}

impl Loader for AliasManager {
    fn load(&self, name: &str) -> bool {
        self.resolve(name)
    }
}

impl fmt::Debug for AliasManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasManager")
            .field("table", &self.table)
            .field("cached", &self.cache.len())
            .field("resolving", &self.resolving)
            .field("config", &self.config)
            .finish()
    }
}
