//! Metrics collection for the resolver.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counters for catalog loads and subordinate queries.
///
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct ResolverMetrics {
    /// Number of successful role catalog loads (each one rebuilds the index).
    pub role_loads: Arc<AtomicU64>,
    /// Number of user catalog loads.
    pub user_loads: Arc<AtomicU64>,
    /// Number of subordinate queries answered.
    pub queries: Arc<AtomicU64>,
    /// Queries that returned no users.
    pub empty_results: Arc<AtomicU64>,
    /// Query counts per duration bucket.
    pub query_durations: Arc<DashMap<&'static str, u64>>,
    /// Rejected loads by error kind.
    pub error_counts: Arc<DashMap<&'static str, AtomicU64>>,
}

impl Default for ResolverMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            role_loads: Arc::new(AtomicU64::new(0)),
            user_loads: Arc::new(AtomicU64::new(0)),
            queries: Arc::new(AtomicU64::new(0)),
            empty_results: Arc::new(AtomicU64::new(0)),
            query_durations: Arc::new(DashMap::new()),
            error_counts: Arc::new(DashMap::new()),
        }
    }

    /// Record a role catalog load.
    pub fn record_role_load(&self) {
        self.role_loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a user catalog load.
    pub fn record_user_load(&self) {
        self.user_loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a subordinate query and how many users it matched.
    pub fn record_query(&self, duration: Duration, matches: usize) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if matches == 0 {
            self.empty_results.fetch_add(1, Ordering::Relaxed);
        }

        *self
            .query_durations
            .entry(Self::duration_to_bucket(duration))
            .or_insert(0) += 1;
    }

    /// Record a rejected load.
    pub fn record_error(&self, kind: &'static str) {
        self.error_counts
            .entry(kind)
            .and_modify(|count| {
                count.fetch_add(1, Ordering::Relaxed);
            })
            .or_insert_with(|| AtomicU64::new(1));
    }

    /// Get metrics summary.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            role_loads: self.role_loads.load(Ordering::Relaxed),
            user_loads: self.user_loads.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            query_durations: self
                .query_durations
                .iter()
                .map(|entry| (*entry.key(), *entry.value()))
                .collect(),
            error_counts: self
                .error_counts
                .iter()
                .map(|entry| (*entry.key(), entry.value().load(Ordering::Relaxed)))
                .collect(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.role_loads.store(0, Ordering::Relaxed);
        self.user_loads.store(0, Ordering::Relaxed);
        self.queries.store(0, Ordering::Relaxed);
        self.empty_results.store(0, Ordering::Relaxed);
        self.query_durations.clear();
        self.error_counts.clear();
    }

    fn duration_to_bucket(duration: Duration) -> &'static str {
        match duration.as_micros() {
            0..=99 => "0-99μs",
            100..=999 => "100-999μs",
            1000..=9999 => "1-9ms",
            10000..=99999 => "10-99ms",
            100000..=999999 => "100-999ms",
            _ => "1s+",
        }
    }
}

/// Point-in-time copy of the metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub role_loads: u64,
    pub user_loads: u64,
    pub queries: u64,
    pub empty_results: u64,
    pub query_durations: HashMap<&'static str, u64>,
    pub error_counts: HashMap<&'static str, u64>,
}
