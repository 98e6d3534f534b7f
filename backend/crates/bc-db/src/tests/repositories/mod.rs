use crate::repositories::from_unix;

use googletest::prelude::*;

#[test]
fn given_valid_timestamp_when_from_unix_then_converts() {
    let result = from_unix("messages", 1_700_000_000);

    assert_that!(result, ok(anything()));
    assert_that!(result.unwrap().timestamp(), eq(1_700_000_000));
}

#[test]
fn given_out_of_range_timestamp_when_from_unix_then_decode_error() {
    let result = from_unix("messages", i64::MAX);

    assert_that!(result, err(anything()));
}
