use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Metrics for the dispatch engine
#[derive(Clone)]
pub struct DispatchMetrics {
    prefix: &'static str,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "bc_dispatch",
        }
    }

    pub fn send_started(&self) {
        gauge!(format!("{}.sends.in_flight", self.prefix)).increment(1.0);
    }

    pub fn send_finished(&self, duration: Duration) {
        gauge!(format!("{}.sends.in_flight", self.prefix)).decrement(1.0);
        histogram!(format!("{}.sends.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    pub fn send_succeeded(&self) {
        counter!(format!("{}.sends.sent", self.prefix)).increment(1);
    }

    /// `reason` is one of the failure reason codes
    pub fn send_failed(&self, reason: &str) {
        counter!(format!("{}.sends.failed", self.prefix)).increment(1);
        counter!(format!("{}.sends.failed.{}", self.prefix, reason)).increment(1);
    }

    pub fn broadcast_dispatched(&self, recipients: usize) {
        counter!(format!("{}.broadcasts.total", self.prefix)).increment(1);
        histogram!(format!("{}.broadcasts.recipients", self.prefix)).record(recipients as f64);
    }

    pub fn readiness_wait(&self, ready: bool, waited: Duration) {
        let outcome = if ready { "ready" } else { "timeout" };
        counter!(format!("{}.readiness.{}", self.prefix, outcome)).increment(1);
        histogram!(format!("{}.readiness.wait_ms", self.prefix))
            .record(waited.as_millis() as f64);
    }

    pub fn resolver_cache_hit(&self) {
        counter!(format!("{}.resolver.cache_hits", self.prefix)).increment(1);
    }

    /// `source` is "primary" or "secondary"
    pub fn resolver_source(&self, source: &str) {
        counter!(format!("{}.resolver.source.{}", self.prefix, source)).increment(1);
    }

    pub fn resolver_fallback(&self) {
        counter!(format!("{}.resolver.fallbacks", self.prefix)).increment(1);
    }

    pub fn ledger_write_failed(&self) {
        counter!(format!("{}.ledger.write_failures", self.prefix)).increment(1);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
