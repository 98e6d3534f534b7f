use crate::metrics::DispatchMetrics;

use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::sync::watch;

/// Waits for the transport readiness flag without polling.
///
/// Every caller waits on its own clone of the receiver, so concurrent
/// broadcasts share one signal and hold no lock while suspended.
#[derive(Clone)]
pub struct ReadinessGate {
    rx: watch::Receiver<bool>,
    metrics: DispatchMetrics,
}

impl ReadinessGate {
    pub fn new(rx: watch::Receiver<bool>, metrics: DispatchMetrics) -> Self {
        Self { rx, metrics }
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }

    /// `true` as soon as the flag is set, `false` once `timeout` elapses.
    ///
    /// A dropped sender can never flip the flag, so a closed signal that is
    /// not already set returns `false` immediately instead of waiting out
    /// the timeout.
    pub async fn ensure_ready(&self, timeout: Duration) -> bool {
        let mut rx = self.rx.clone();
        let started = Instant::now();

        let ready = match tokio::time::timeout(timeout, rx.wait_for(|ready| *ready)).await {
            Ok(Ok(_)) => true,
            Ok(Err(_)) => {
                warn!("Transport readiness signal closed; treating as not ready");
                false
            }
            Err(_) => {
                warn!("Transport not ready within {:?}", timeout);
                false
            }
        };

        let waited = started.elapsed();
        self.metrics.readiness_wait(ready, waited);

        if ready {
            debug!("Transport ready after {:?}", waited);
        }

        ready
    }
}
