use crate::DeliveryStatus;

use std::str::FromStr;

#[test]
fn test_delivery_status_as_str() {
    assert_eq!(DeliveryStatus::Pending.as_str(), "pending");
    assert_eq!(DeliveryStatus::Sent.as_str(), "sent");
    assert_eq!(DeliveryStatus::Failed.as_str(), "failed");
}

#[test]
fn test_delivery_status_from_str() {
    assert_eq!(
        DeliveryStatus::from_str("sent").unwrap(),
        DeliveryStatus::Sent
    );
    assert_eq!(
        DeliveryStatus::from_str("failed").unwrap(),
        DeliveryStatus::Failed
    );
    assert!(DeliveryStatus::from_str("delivered").is_err());
}

#[test]
fn test_delivery_status_default() {
    assert_eq!(DeliveryStatus::default(), DeliveryStatus::Pending);
}

#[test]
fn test_delivery_status_serializes_snake_case() {
    let json = serde_json::to_string(&DeliveryStatus::Failed).unwrap();
    assert_eq!(json, "\"failed\"");
}
