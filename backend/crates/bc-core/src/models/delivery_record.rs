use crate::DeliveryStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted outcome of one delivery attempt to one recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: i64,
    pub broadcast_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub phone: String,
    pub body: String,
    pub transport_message_id: Option<String>,
    pub status: DeliveryStatus,
    pub error_text: Option<String>,
    pub attempts: i64,
    pub last_attempt_at: Option<DateTime<Utc>>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A delivery outcome about to be written to the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeliveryRecord {
    pub broadcast_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub phone: String,
    pub body: String,
    pub transport_message_id: Option<String>,
    pub status: DeliveryStatus,
    pub error_text: Option<String>,
    pub attempts: i64,
    pub attempted_at: DateTime<Utc>,
}

impl NewDeliveryRecord {
    pub fn sent(
        broadcast_id: Option<i64>,
        customer_id: Option<i64>,
        phone: &str,
        body: &str,
        transport_message_id: Option<String>,
    ) -> Self {
        Self {
            broadcast_id,
            customer_id,
            phone: phone.to_string(),
            body: body.to_string(),
            transport_message_id,
            status: DeliveryStatus::Sent,
            error_text: None,
            attempts: 1,
            attempted_at: Utc::now(),
        }
    }

    pub fn failed(
        broadcast_id: Option<i64>,
        customer_id: Option<i64>,
        phone: &str,
        body: &str,
        error_text: impl Into<String>,
    ) -> Self {
        Self {
            broadcast_id,
            customer_id,
            phone: phone.to_string(),
            body: body.to_string(),
            transport_message_id: None,
            status: DeliveryStatus::Failed,
            error_text: Some(error_text.into()),
            attempts: 1,
            attempted_at: Utc::now(),
        }
    }
}
