//! Integration tests for alias resolution
//!
//! Covers literal, namespace, and pattern resolution, precedence, caching,
//! removal, and termination of self-referential rule sets.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alias_resolver::{
    AliasBinder, AliasCache, AliasManager, ExistenceCheck, ManagerConfig, MemoryCache, Strategy,
    Translation,
};
use common::{init_tracing, registry_with, CountingRegistry, Host};

// ============================================================================
// Literal Aliases
// ============================================================================

#[test]
fn test_literal_alias_resolves_and_caches() {
    init_tracing();
    let registry = registry_with(&["Acme\\Dummy"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias("Test", "Acme\\Dummy");

    assert!(manager.resolve("Test"));
    assert!(manager.cache().has("Test"));
    assert_eq!(manager.cache().get("Test").as_deref(), Some("Acme\\Dummy"));
    assert_eq!(registry.target_of("Test").as_deref(), Some("Acme\\Dummy"));
}

#[test]
fn test_literal_with_missing_target_falls_through() {
    let registry = registry_with(&["Fallback\\Dummy"]);
    let mut manager = AliasManager::new(registry);
    manager
        .alias("Dummy", "Missing\\Dummy")
        .alias_namespace("Fallback", "");

    let resolution = manager.lookup("Dummy").unwrap();
    assert_eq!(resolution.strategy, Strategy::Namespace);
    assert_eq!(resolution.target, "Fallback\\Dummy");
}

#[test]
fn test_unknown_alias_has_no_side_effects() {
    let registry = registry_with(&["Acme\\Dummy"]);
    let mut manager = AliasManager::new(registry.clone());
    manager
        .alias("Test", "Acme\\Dummy")
        .alias_pattern("Other\\*", "Acme\\$1")
        .alias_namespace("Acme", "Vendor");

    assert!(!manager.resolve("Unknown"));
    assert!(!manager.resolve("Other\\Missing"));
    assert!(!manager.resolve("Vendor\\Missing"));

    assert!(manager.cache().is_empty());
    assert!(registry.bindings().is_empty());
    assert_eq!(manager.resolving().depth(), 0);
}

#[test]
fn test_literal_beats_pattern() {
    let registry = registry_with(&["Literal\\Target", "Pattern\\Target"]);
    let mut manager = AliasManager::new(registry.clone());
    manager
        .alias_pattern("Target", "Pattern\\Target")
        .alias("Target", "Literal\\Target");

    assert!(manager.resolve("Target"));
    assert_eq!(registry.target_of("Target").as_deref(), Some("Literal\\Target"));
}

#[test]
fn test_second_resolution_uses_cache() {
    let registry = CountingRegistry::with_types(&["Acme\\Dummy"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias("Test", "Acme\\Dummy");

    assert!(manager.resolve("Test"));
    let checks = registry.loading_checks();
    assert!(checks > 0);

    assert!(manager.resolve("Test"));
    assert_eq!(registry.loading_checks(), checks);
    assert_eq!(manager.lookup("Test").unwrap().strategy, Strategy::Cache);

    let metrics = manager.metrics().unwrap();
    assert_eq!(metrics.resolved, 2);
    assert_eq!(metrics.literal_hits, 1);
    assert_eq!(metrics.cache_hits, 1);
}

#[test]
fn test_cache_hit_skips_existence_check() {
    let cache = Arc::new(MemoryCache::with_entries([("Cached", "Nowhere\\Type")]));
    let registry = CountingRegistry::with_types(&[]);
    let manager = AliasManager::with_cache(registry.clone(), cache);

    assert!(manager.resolve("Cached"));
    assert!(registry.checked().is_empty());
    assert_eq!(registry.inner.target_of("Cached").as_deref(), Some("Nowhere\\Type"));
}

#[test]
fn test_empty_cached_target_is_a_miss() {
    let cache = Arc::new(MemoryCache::with_entries([("Blank", "")]));
    let registry = registry_with(&["Acme\\Blank"]);
    let mut manager = AliasManager::with_cache(registry, cache.clone());
    manager.alias("Blank", "Acme\\Blank");

    assert!(manager.resolve("Blank"));
    // The existing entry is not overwritten
    assert_eq!(cache.get("Blank").as_deref(), Some(""));
}

// ============================================================================
// Namespace Aliases
// ============================================================================

#[test]
fn test_catch_all_namespace() {
    let registry = registry_with(&["Foo\\Bar\\Dummy"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias_namespace("Foo\\Bar", "");

    assert!(manager.resolve("Dummy"));
    assert_eq!(registry.target_of("Dummy").as_deref(), Some("Foo\\Bar\\Dummy"));
}

#[test]
fn test_prefixed_namespace() {
    let registry = registry_with(&["Fuel\\Alias\\Dummy"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias_namespace("\\Fuel\\Alias\\", "\\Check\\ItOut\\");

    assert!(manager.resolve("Check\\ItOut\\Dummy"));
    assert_eq!(
        registry.target_of("Check\\ItOut\\Dummy").as_deref(),
        Some("Fuel\\Alias\\Dummy")
    );

    // Prefix must cover whole segments
    assert!(!manager.resolve("Check\\ItOutDummy"));
    assert!(!manager.resolve("Check\\ItOut"));
}

#[test]
fn test_first_matching_namespace_wins() {
    let registry = registry_with(&["First\\Dummy", "Second\\Dummy", "Second\\Only"]);
    let mut manager = AliasManager::new(registry);
    manager
        .alias_namespace("First", "")
        .alias_namespace("Second", "");

    assert_eq!(manager.lookup("Dummy").unwrap().target, "First\\Dummy");
    assert_eq!(manager.lookup("Only").unwrap().target, "Second\\Only");
}

#[test]
fn test_namespace_beats_pattern() {
    let registry = registry_with(&["Ns\\Widget", "Pattern\\Widget"]);
    let mut manager = AliasManager::new(registry);
    manager
        .alias_pattern("*", "Pattern\\$1")
        .alias_namespace("Ns", "");

    assert_eq!(manager.lookup("Widget").unwrap().target, "Ns\\Widget");
}

// ============================================================================
// Pattern Aliases
// ============================================================================

#[test]
fn test_pattern_template() {
    let registry = registry_with(&["Target\\Widget"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias_pattern("Test\\*", "Target\\$1");

    assert!(manager.resolve("Test\\Widget"));
    assert_eq!(registry.target_of("Test\\Widget").as_deref(), Some("Target\\Widget"));
    assert!(!manager.resolve("Test\\Missing"));
}

#[test]
fn test_pattern_exact_key_fast_path() {
    let registry = registry_with(&["Exact\\Target", "Wild\\PatternResolvable"]);
    let mut manager = AliasManager::new(registry.clone());
    manager
        .alias_pattern("*", "Wild\\$1")
        .alias_pattern("PatternResolvable", "Exact\\Target");

    assert!(manager.resolve("PatternResolvable"));
    assert_eq!(
        registry.target_of("PatternResolvable").as_deref(),
        Some("Exact\\Target")
    );
}

#[test]
fn test_pattern_falls_through_to_later_entries() {
    let registry = registry_with(&["Second\\Widget"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias_patterns([("*", "First\\$1"), ("*", "Ignored\\$1")]);
    manager.alias_pattern("W*", "Second\\W$1");

    assert!(manager.resolve("Widget"));
    assert_eq!(registry.target_of("Widget").as_deref(), Some("Second\\Widget"));
}

#[test]
fn test_computed_translation() {
    let registry = registry_with(&["App\\Blog\\Models\\Post"]);
    let mut manager = AliasManager::new(registry.clone());
    manager.alias_pattern(
        "Model\\*\\*",
        Translation::computed(|caps| Some(format!("App\\{}\\Models\\{}", caps[0], caps[1]))),
    );

    assert!(manager.resolve("Model\\Blog\\Post"));
    assert!(!manager.resolve("Model\\Shop\\Order"));
}

#[test]
fn test_try_alias_pattern() {
    let registry = registry_with(&[]);
    let mut manager = AliasManager::new(registry);
    assert!(manager.try_alias_pattern("Test\\*", "Target\\$1").is_ok());
    assert_eq!(manager.table().patterns().count(), 1);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_alias() {
    let registry = registry_with(&["Acme\\Dummy"]);
    let mut manager = AliasManager::new(registry);
    manager.alias_many([("One", "Acme\\Dummy"), ("Two", "Acme\\Dummy")]);

    manager.remove_alias(["One"]);
    assert!(!manager.resolve("One"));
    assert!(manager.resolve("Two"));
}

#[test]
fn test_remove_pattern_scoped_by_translation() {
    let registry = registry_with(&["Target\\Widget"]);
    let mut manager = AliasManager::new(registry);
    manager.alias_pattern("Test\\*", "Target\\$1");

    manager.remove_alias_pattern("Test\\*", Some(&Translation::from("Other\\$1")));
    assert!(manager.lookup("Test\\Widget").is_some());

    manager.remove_alias_pattern("Test\\*", Some(&Translation::from("Target\\$1")));
    assert!(manager.lookup("Test\\Widget").is_none());
}

#[test]
fn test_remove_pattern_unscoped() {
    let registry = registry_with(&["Target\\Widget"]);
    let mut manager = AliasManager::new(registry);
    manager.alias_pattern("Test\\*", "Target\\$1");

    manager.remove_alias_pattern("Test\\*", None);
    assert!(!manager.resolve("Test\\Widget"));
}

#[test]
fn test_remove_namespace_alias() {
    let registry = registry_with(&["Foo\\Bar\\Dummy"]);
    let mut manager = AliasManager::new(registry);
    manager
        .alias_namespace("Foo\\Bar", "")
        .alias_namespace("Foo\\Bar", "Short");

    manager.remove_namespace_alias(["\\Foo\\Bar"]);
    assert!(manager.table().namespaces().is_empty());
    assert!(!manager.resolve("Dummy"));
}

#[test]
fn test_removal_keeps_other_strategies() {
    let registry = registry_with(&["Acme\\Dummy"]);
    let mut manager = AliasManager::new(registry);
    manager
        .alias("Dummy", "Acme\\Dummy")
        .alias_namespace("Acme", "");

    manager.remove_alias(["Dummy"]);
    assert_eq!(manager.lookup("Dummy").unwrap().strategy, Strategy::Namespace);
}

// ============================================================================
// Recursion Safety
// ============================================================================

#[test]
fn test_stop_recursion() {
    init_tracing();
    let host = Host::new(&[]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager
        .alias_pattern("*\\*", "$2\\$1")
        .alias_pattern("*", "$1");
    let manager = host.install(manager);

    assert!(!manager.resolve("Unre\\Solvable"));
    assert!(!manager.resolve("Unresolvable"));

    assert_eq!(manager.resolving().depth(), 0);
    assert!(manager.cache().is_empty());
    assert!(manager.metrics().unwrap().recursion_aborts > 0);
}

#[test]
fn test_self_referential_namespace_terminates() {
    let host = Host::new(&[]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager.alias_namespace("Loop", "").alias_namespace("", "Loop");
    let manager = host.install(manager);

    assert!(!manager.resolve("Loop\\Dummy"));
    assert_eq!(manager.resolving().depth(), 0);
}

#[test]
fn test_literal_target_resolves_through_chain() {
    let host = Host::new(&["Concrete\\Widget"]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager
        .alias("Outer\\Widget", "Middle\\Widget")
        .alias_pattern("Middle\\*", "Concrete\\$1");
    let manager = host.install(manager);

    // The literal target only exists once the chain resolves it
    assert!(manager.resolve("Outer\\Widget"));
    assert_eq!(
        host.registry.target_of("Outer\\Widget").as_deref(),
        Some("Concrete\\Widget")
    );
    assert!(manager.cache().has("Middle\\Widget"));
}

#[test]
fn test_pattern_candidate_is_not_resolved_through_chain() {
    let host = Host::new(&["Concrete\\Widget"]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager
        .alias("Middle\\Widget", "Concrete\\Widget")
        .alias_pattern("Outer\\*", "Middle\\$1");
    let manager = host.install(manager);

    assert!(!manager.resolve("Outer\\Widget"));
    assert!(host.registry.target_of("Outer\\Widget").is_none());
    assert_eq!(manager.resolving().depth(), 0);

    // Once the candidate is known on its own, the pattern applies
    assert!(manager.resolve("Middle\\Widget"));
    assert!(manager.resolve("Outer\\Widget"));
}

#[test]
fn test_lengthening_pattern_terminates() {
    let host = Host::new(&[]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager.alias_pattern("*", "Wrapped\\$1");
    let manager = host.install(manager);

    assert!(!manager.resolve("Widget"));
    assert!(!host.chain.load("Widget"));
    assert_eq!(manager.resolving().depth(), 0);
    assert!(manager.cache().is_empty());
    assert!(host.registry.bindings().is_empty());
}

#[test]
fn test_lengthening_namespace_and_pattern_terminate() {
    let host = Host::new(&[]);
    let mut manager = AliasManager::new(host.registry.clone());
    manager
        .alias_namespace("Outer", "")
        .alias_pattern("*\\*", "$1\\$2\\$1")
        .alias("Start", "Outer\\Start");
    let manager = host.install(manager);

    assert!(!manager.resolve("Start"));
    assert!(!manager.resolve("Outer\\Start"));
    assert_eq!(manager.resolving().depth(), 0);
}

// ============================================================================
// Bind-time Verification
// ============================================================================

/// Reports a name as existing on its first check only
#[derive(Default)]
struct Vanishing {
    calls: AtomicUsize,
    bound: AtomicUsize,
}

impl ExistenceCheck for Vanishing {
    fn exists(&self, _identifier: &str, _allow_load: bool) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst) == 0
    }
}

impl AliasBinder for Vanishing {
    fn bind(&self, _target: &str, _alias: &str) {
        self.bound.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_vanished_target_is_not_bound() {
    let host = Arc::new(Vanishing::default());
    let mut manager = AliasManager::new(host.clone());
    manager.alias("Ghost", "Acme\\Ghost");

    assert!(!manager.resolve("Ghost"));
    assert_eq!(host.bound.load(Ordering::SeqCst), 0);
    assert!(manager.cache().is_empty());
}

#[test]
fn test_bind_check_can_be_disabled() {
    let host = Arc::new(Vanishing::default());
    let config = ManagerConfig {
        verify_on_bind: false,
        ..Default::default()
    };
    let mut manager = AliasManager::with_config(host.clone(), None, config);
    manager.alias("Ghost", "Acme\\Ghost");

    assert!(manager.resolve("Ghost"));
    assert_eq!(host.bound.load(Ordering::SeqCst), 1);
    assert_eq!(host.calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Property Tests
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_cyclic_rewrites_always_terminate(alias in "[A-Za-z]{1,6}(\\\\[A-Za-z]{1,6}){0,3}") {
            let host = Host::new(&[]);
            let mut manager = AliasManager::new(host.registry.clone());
            manager
                .alias_pattern("*\\*", "$2\\$1")
                .alias_pattern("*", "$1")
                .alias_namespace("", "");
            let manager = host.install(manager);

            prop_assert!(!manager.resolve(&alias));
            prop_assert_eq!(manager.resolving().depth(), 0);
        }

        #[test]
        fn test_lengthening_rewrites_always_terminate(
            alias in "[A-Za-z]{1,6}(\\\\[A-Za-z]{1,6}){0,2}",
            prefix in "[A-Z][a-z]{0,5}",
        ) {
            let host = Host::new(&[]);
            let mut manager = AliasManager::new(host.registry.clone());
            manager
                .alias_pattern("*", format!("{}\\$1", prefix))
                .alias_pattern("*\\*", "$0\\$0")
                .alias_namespace(&prefix, "");
            let manager = host.install(manager);

            prop_assert!(!manager.resolve(&alias));
            prop_assert_eq!(manager.resolving().depth(), 0);
        }

        #[test]
        fn test_unmatched_alias_leaves_no_trace(alias in "[a-z]{1,12}") {
            let registry = registry_with(&["Acme\\Dummy"]);
            let mut manager = AliasManager::new(registry.clone());
            manager
                .alias("Known", "Acme\\Dummy")
                .alias_pattern("Known\\*", "Acme\\$1");

            prop_assert!(!manager.resolve(&alias));
            prop_assert!(manager.cache().is_empty());
            prop_assert!(registry.bindings().is_empty());
        }
    }
}
