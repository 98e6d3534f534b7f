use crate::metrics::DispatchMetrics;
use crate::retry::{RetryConfig, with_retry};
use crate::store::SecondaryStore;

use bc_core::{NewBroadcast, NewDeliveryRecord};

use std::sync::Arc;

use log::{debug, warn};

/// Best-effort writer for broadcasts and delivery records.
///
/// Write failures are retried while they look transient and then logged.
/// They never reach the caller, so a broken database cannot stop delivery.
#[derive(Clone)]
pub struct DeliveryLedger {
    store: Option<Arc<dyn SecondaryStore>>,
    retry: RetryConfig,
    metrics: DispatchMetrics,
}

impl DeliveryLedger {
    pub fn new(
        store: Option<Arc<dyn SecondaryStore>>,
        retry: RetryConfig,
        metrics: DispatchMetrics,
    ) -> Self {
        Self {
            store,
            retry,
            metrics,
        }
    }

    /// Create the grouping record for a broadcast. `None` if it could not be stored.
    pub async fn open_broadcast(&self, name: Option<&str>, message: &str) -> Option<i64> {
        let store = self.store.as_ref()?;
        let broadcast = NewBroadcast::new(name, message);

        match with_retry(&self.retry, "open_broadcast", || {
            store.insert_broadcast(&broadcast)
        })
        .await
        {
            Ok(id) => {
                debug!("Opened broadcast {} ({})", id, broadcast.name);
                Some(id)
            }
            Err(e) => {
                self.metrics.ledger_write_failed();
                warn!("Cannot create broadcast record, continuing without one: {}", e);
                None
            }
        }
    }

    /// Store one delivery outcome. Returns whether it was written.
    pub async fn record(&self, record: &NewDeliveryRecord) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };

        match with_retry(&self.retry, "record_delivery", || {
            store.insert_delivery_record(record)
        })
        .await
        {
            Ok(_) => true,
            Err(e) => {
                self.metrics.ledger_write_failed();
                warn!(
                    "Dropping delivery record for {} ({}): {}",
                    record.phone, record.status, e
                );
                false
            }
        }
    }
}
