use crate::NewCustomer;

use googletest::prelude::*;

#[test]
fn given_phone_when_validated_then_ok() {
    let customer = NewCustomer::new("+20 100 000 0000");

    assert_that!(customer.validate(), ok(anything()));
}

#[test]
fn given_blank_phone_when_validated_then_error() {
    let customer = NewCustomer::new("   ");

    assert_that!(customer.validate(), err(anything()));
}
