use crate::NewBroadcast;
use crate::models::broadcast::{BROADCAST_STATUS_SENDING, DEFAULT_BROADCAST_NAME};

use googletest::prelude::*;

#[test]
fn given_no_name_when_new_broadcast_then_uses_default_name() {
    let broadcast = NewBroadcast::new(None, "hello");

    assert_that!(broadcast.name, eq(DEFAULT_BROADCAST_NAME));
    assert_that!(broadcast.message, eq("hello"));
    assert_that!(broadcast.status, eq(BROADCAST_STATUS_SENDING));
}

#[test]
fn given_blank_name_when_new_broadcast_then_uses_default_name() {
    let broadcast = NewBroadcast::new(Some("   "), "hello");

    assert_that!(broadcast.name, eq(DEFAULT_BROADCAST_NAME));
}

#[test]
fn given_name_when_new_broadcast_then_name_is_trimmed() {
    let broadcast = NewBroadcast::new(Some("  Eid offers "), "hello");

    assert_that!(broadcast.name, eq("Eid offers"));
}
