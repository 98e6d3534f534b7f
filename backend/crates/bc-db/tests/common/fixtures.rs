use bc_core::{NewBroadcast, NewCustomer, NewDeliveryRecord};

use serde_json::json;

pub fn create_test_customer(phone: &str) -> NewCustomer {
    NewCustomer {
        name: Some("Test Customer".to_string()),
        phone: phone.to_string(),
        email: Some("customer@example.com".to_string()),
        metadata: Some(json!({ "city": "Cairo" })),
    }
}

pub fn create_test_broadcast() -> NewBroadcast {
    NewBroadcast::new(Some("Spring sale"), "Hello from the shop")
}

pub fn create_sent_record(broadcast_id: Option<i64>, phone: &str) -> NewDeliveryRecord {
    NewDeliveryRecord::sent(
        broadcast_id,
        None,
        phone,
        "Hello from the shop",
        Some(format!("msg-{}", phone)),
    )
}

pub fn create_failed_record(broadcast_id: Option<i64>, phone: &str) -> NewDeliveryRecord {
    NewDeliveryRecord::failed(broadcast_id, None, phone, "Hello from the shop", "not_registered")
}
