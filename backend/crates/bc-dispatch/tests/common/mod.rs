#![allow(dead_code)]

pub mod fakes;

use bc_dispatch::{DispatchMetrics, RetryConfig};

use std::time::Duration;

/// Fast retries so failing-store tests finish quickly
pub fn quick_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

pub fn metrics() -> DispatchMetrics {
    DispatchMetrics::new()
}
