//! Resolution counters

use std::sync::atomic::{AtomicU64, Ordering};

use super::Strategy;

/// Snapshot of resolution counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Successful resolutions
    pub resolved: u64,

    /// Failed resolutions
    pub failed: u64,

    /// Resolutions abandoned because the alias was already in flight
    pub recursion_aborts: u64,

    /// Resolutions served from the cache
    pub cache_hits: u64,

    /// Resolutions by literal alias
    pub literal_hits: u64,

    /// Resolutions by namespace alias
    pub namespace_hits: u64,

    /// Resolutions by pattern alias
    pub pattern_hits: u64,
}

impl EngineMetrics {
    /// Total number of resolution attempts
    pub fn total(&self) -> u64 {
        self.resolved + self.failed
    }

    /// Fraction of attempts that resolved
    pub fn resolve_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.resolved as f64 / total as f64
        }
    }

    /// Fraction of successful resolutions served from the cache
    pub fn cache_hit_rate(&self) -> f64 {
        if self.resolved == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.resolved as f64
        }
    }
}

/// Collects resolution counters
#[derive(Debug, Default)]
pub struct MetricsCollector {
    resolved: AtomicU64,
    failed: AtomicU64,
    recursion_aborts: AtomicU64,
    cache_hits: AtomicU64,
    literal_hits: AtomicU64,
    namespace_hits: AtomicU64,
    pattern_hits: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful resolution
    pub fn record_resolved(&self, strategy: Strategy) {
        self.resolved.fetch_add(1, Ordering::Relaxed);

        let counter = match strategy {
            Strategy::Cache => &self.cache_hits,
            Strategy::Literal => &self.literal_hits,
            Strategy::Namespace => &self.namespace_hits,
            Strategy::Pattern => &self.pattern_hits,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed resolution
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a recursion abort
    pub fn record_recursion_abort(&self) {
        self.recursion_aborts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics
    pub fn get_metrics(&self) -> EngineMetrics {
        EngineMetrics {
            resolved: self.resolved.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            recursion_aborts: self.recursion_aborts.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            literal_hits: self.literal_hits.load(Ordering::Relaxed),
            namespace_hits: self.namespace_hits.load(Ordering::Relaxed),
            pattern_hits: self.pattern_hits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.resolved,
            &self.failed,
            &self.recursion_aborts,
            &self.cache_hits,
            &self.literal_hits,
            &self.namespace_hits,
            &self.pattern_hits,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
