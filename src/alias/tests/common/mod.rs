//! Common test utilities shared across the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alias_resolver::{
    AliasBinder, AliasManager, ExistenceCheck, HookChain, Placement, TypeRegistry,
};
use parking_lot::Mutex;

/// Routes `tracing` output through the test harness, once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Registry wrapper recording every existence check
#[derive(Debug, Default)]
pub struct CountingRegistry {
    pub inner: TypeRegistry,
    pub loading_checks: AtomicUsize,
    pub checked: Mutex<Vec<String>>,
}

impl CountingRegistry {
    pub fn with_types(types: &[&str]) -> Arc<Self> {
        let registry = Self::default();
        registry.inner.define_all(types.iter().copied());
        Arc::new(registry)
    }

    pub fn loading_checks(&self) -> usize {
        self.loading_checks.load(Ordering::SeqCst)
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().clone()
    }
}

impl ExistenceCheck for CountingRegistry {
    fn exists(&self, identifier: &str, allow_load: bool) -> bool {
        if allow_load {
            self.loading_checks.fetch_add(1, Ordering::SeqCst);
        }
        self.checked.lock().push(identifier.to_string());
        self.inner.exists(identifier, allow_load)
    }
}

impl AliasBinder for CountingRegistry {
    fn bind(&self, target: &str, alias: &str) {
        self.inner.bind(target, alias);
    }
}

/// Registry with the given types defined
pub fn registry_with(types: &[&str]) -> Arc<TypeRegistry> {
    let registry = TypeRegistry::new();
    registry.define_all(types.iter().copied());
    Arc::new(registry)
}

/// Host wiring: a registry whose misses run a loader chain
pub struct Host {
    pub registry: Arc<TypeRegistry>,
    pub chain: Arc<HookChain>,
}

impl Host {
    pub fn new(types: &[&str]) -> Self {
        let registry = registry_with(types);
        let chain = Arc::new(HookChain::new());
        registry.attach_chain(&chain);
        Self { registry, chain }
    }

    /// Registers a configured manager with the chain
    pub fn install(&self, manager: AliasManager) -> Arc<AliasManager> {
        let manager = Arc::new(manager);
        manager.register(&self.chain, Placement::Prepend);
        manager
    }
}
