//! Internal metrics collection.
//!
//! Lock-free counters kept in memory and reported by the health endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Last observed value.
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Running latency summary in milliseconds: count, sum and maximum.
#[derive(Debug, Default)]
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
    max: AtomicU64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.max.fetch_max(ms, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn max(&self) -> u64 {
        self.max.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum.load(Ordering::Relaxed) as f64 / count as f64
        }
    }
}

/// Collected metrics for the contact service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Request metrics, one counter per operation
    pub list_requests: Counter,
    pub get_requests: Counter,
    pub count_requests: Counter,
    pub pagination_requests: Counter,
    pub create_requests: Counter,
    pub update_requests: Counter,
    pub delete_requests: Counter,
    pub bulk_delete_requests: Counter,

    // Outcomes
    pub records_created: Counter,
    pub records_updated: Counter,
    pub records_deleted: Counter,
    pub validation_failures: Counter,

    // Store metrics
    pub store_errors: Counter,
    pub store_timeouts: Counter,

    // Cache metrics
    pub cache_hits: Counter,
    pub cache_misses: Counter,

    // Latency
    pub store_latency_ms: Histogram,

    // Gauges
    pub cache_entries: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub requests: u64,
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub validation_failures: u64,
    pub store_errors: u64,
    pub store_timeouts: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub store_latency_mean_ms: f64,
    pub store_latency_max_ms: u64,
    pub cache_entries: u64,
}

impl Metrics {
    /// Total requests across all operations.
    pub fn total_requests(&self) -> u64 {
        [
            &self.list_requests,
            &self.get_requests,
            &self.count_requests,
            &self.pagination_requests,
            &self.create_requests,
            &self.update_requests,
            &self.delete_requests,
            &self.bulk_delete_requests,
        ]
        .iter()
        .map(|c| c.get())
        .sum()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            requests: self.total_requests(),
            records_created: self.records_created.get(),
            records_updated: self.records_updated.get(),
            records_deleted: self.records_deleted.get(),
            validation_failures: self.validation_failures.get(),
            store_errors: self.store_errors.get(),
            store_timeouts: self.store_timeouts.get(),
            cache_hits: self.cache_hits.get(),
            cache_misses: self.cache_misses.get(),
            store_latency_mean_ms: self.store_latency_ms.mean(),
            store_latency_max_ms: self.store_latency_ms.max(),
            cache_entries: self.cache_entries.get(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
