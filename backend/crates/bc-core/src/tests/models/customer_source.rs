use crate::CustomerSource;

use std::str::FromStr;

#[test]
fn test_customer_source_as_str() {
    assert_eq!(CustomerSource::Primary.as_str(), "primary");
    assert_eq!(CustomerSource::Secondary.as_str(), "secondary");
}

#[test]
fn test_customer_source_from_str() {
    assert_eq!(
        CustomerSource::from_str("secondary").unwrap(),
        CustomerSource::Secondary
    );
    assert!(CustomerSource::from_str("sheet").is_err());
}

#[test]
fn test_customer_source_display_matches_serde() {
    let json = serde_json::to_string(&CustomerSource::Primary).unwrap();
    assert_eq!(json, format!("\"{}\"", CustomerSource::Primary));
}
