//! Service statistics
//!
//! Atomic counters for monitoring dispatch behavior. `builders_constructed`
//! makes the one-builder-per-endpoint guarantee observable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-service dispatch counters.
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub requests_dispatched: AtomicU64,
    pub successful_responses: AtomicU64,
    pub failed_responses: AtomicU64,
    pub transport_errors: AtomicU64,
    pub builders_constructed: AtomicU64,
    pub builder_cache_hits: AtomicU64,
}

impl ServiceStats {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_dispatch(&self) {
        self.requests_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self) {
        self.successful_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failed_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_builder_constructed(&self) {
        self.builders_constructed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.builder_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Create a point-in-time snapshot of the counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_dispatched: self.requests_dispatched.load(Ordering::Relaxed),
            successful_responses: self.successful_responses.load(Ordering::Relaxed),
            failed_responses: self.failed_responses.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            builders_constructed: self.builders_constructed.load(Ordering::Relaxed),
            builder_cache_hits: self.builder_cache_hits.load(Ordering::Relaxed),
        }
    }
}

/// Plain-value view of [`ServiceStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub requests_dispatched: u64,
    pub successful_responses: u64,
    pub failed_responses: u64,
    pub transport_errors: u64,
    pub builders_constructed: u64,
    pub builder_cache_hits: u64,
}
