use crate::SendBroadcastRequest;

use googletest::prelude::*;
use serde_json::json;

fn request(concurrency: serde_json::Value) -> SendBroadcastRequest {
    serde_json::from_value(json!({ "message": "hi", "concurrency": concurrency })).unwrap()
}

#[test]
fn given_positive_concurrency_then_limit_is_kept() {
    assert_that!(request(json!(3)).concurrency_limit(), some(eq(3)));
}

#[test]
fn given_zero_or_negative_concurrency_then_default_is_used() {
    assert_that!(request(json!(0)).concurrency_limit(), none());
    assert_that!(request(json!(-1)).concurrency_limit(), none());
}

#[test]
fn given_missing_concurrency_then_default_is_used() {
    let req: SendBroadcastRequest = serde_json::from_value(json!({ "message": "hi" })).unwrap();

    assert_that!(req.concurrency_limit(), none());
}
