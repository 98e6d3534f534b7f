use crate::DeliveryHistoryQuery;

use googletest::prelude::*;

fn query(limit: Option<i64>) -> DeliveryHistoryQuery {
    DeliveryHistoryQuery {
        phone: Some("1555".into()),
        limit,
    }
}

#[test]
fn given_no_limit_then_default_used() {
    assert_that!(query(None).limit(), eq(50));
}

#[test]
fn given_non_positive_limit_then_default_used() {
    assert_that!(query(Some(0)).limit(), eq(50));
    assert_that!(query(Some(-3)).limit(), eq(50));
}

#[test]
fn given_huge_limit_then_capped() {
    assert_that!(query(Some(10_000)).limit(), eq(500));
}
