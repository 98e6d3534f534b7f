use crate::CustomerListQuery;

#[test]
fn test_force_flag_values() {
    let forced = |value: Option<&str>| {
        CustomerListQuery {
            force: value.map(String::from),
        }
        .is_forced()
    };

    assert!(forced(Some("1")));
    assert!(forced(Some("true")));
    assert!(!forced(Some("0")));
    assert!(!forced(Some("yes")));
    assert!(!forced(None));
}
