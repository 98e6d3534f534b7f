use bc_core::DeliveryRecord;

use serde::Serialize;

/// Most recent deliveries to one number, newest first
#[derive(Debug, Serialize)]
pub struct DeliveryHistoryResponse {
    pub number: String,
    pub deliveries: Vec<DeliveryRecord>,
}
