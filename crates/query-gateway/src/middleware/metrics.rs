//! Request counters for the query gateway.
//!
//! Lock-free atomics, exported as JSON on `/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Query gateway metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    /// Actions not in the registry
    pub unknown_actions: AtomicU64,

    // Submission counters
    pub submissions_accepted: AtomicU64,
    pub submissions_rejected: AtomicU64,

    // Latency tracking (simplified - in production use histograms)
    pub total_latency_us: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatched request
    pub fn record_request(&self, success: bool, is_write: bool, latency_us: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        if is_write {
            if success {
                self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
            } else {
                self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
            }
        }

        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);
        self.request_count_for_latency
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request for an action the registry does not know
    pub fn record_unknown_action(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_error.fetch_add(1, Ordering::Relaxed);
        self.unknown_actions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in microseconds
    pub fn average_latency_us(&self) -> f64 {
        let total = self.total_latency_us.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "unknown_action": self.unknown_actions.load(Ordering::Relaxed),
            },
            "submissions": {
                "accepted": self.submissions_accepted.load(Ordering::Relaxed),
                "rejected": self.submissions_rejected.load(Ordering::Relaxed),
            },
            "latency": {
                "average_us": self.average_latency_us(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    is_write: bool,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, is_write: bool) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            is_write,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_us = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.metrics
            .record_request(success, self.is_write, latency_us);
    }
}
