use bc_core::{Broadcast, DeliveryRecord};

use serde::Serialize;

/// A broadcast with every delivery recorded for it
#[derive(Debug, Serialize)]
pub struct DeliveryListResponse {
    pub broadcast: Broadcast,
    pub deliveries: Vec<DeliveryRecord>,
}
