use crate::{NumbersInput, SendBroadcastRequest};

use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_separated_string_when_into_list_then_split_on_whitespace_commas_semicolons() {
    let input = NumbersInput::Text(" 201001112222, 201003334444;201005556666\n1555 ".into());

    let numbers = input.into_list();

    assert_that!(
        numbers,
        eq(&vec![
            "201001112222".to_string(),
            "201003334444".into(),
            "201005556666".into(),
            "1555".into(),
        ])
    );
}

#[test]
fn given_array_with_blanks_when_into_list_then_blanks_dropped() {
    let input = NumbersInput::List(vec!["1555".into(), "  ".into(), "1666".into()]);

    assert_that!(input.into_list(), eq(&vec!["1555".to_string(), "1666".into()]));
}

#[test]
fn given_json_string_or_array_when_deserialized_then_both_accepted() {
    let from_text: SendBroadcastRequest =
        serde_json::from_value(json!({ "numbers": "1,2", "message": "hi" })).unwrap();
    let from_list: SendBroadcastRequest =
        serde_json::from_value(json!({ "numbers": ["1", "2"], "message": "hi" })).unwrap();

    assert_that!(from_text.numbers, some(eq(&NumbersInput::Text("1,2".into()))));
    assert_that!(
        from_list.numbers.map(NumbersInput::into_list),
        some(eq(&vec!["1".to_string(), "2".into()]))
    );
}

#[test]
fn given_camel_case_fields_when_deserialized_then_aliases_apply() {
    let req: SendBroadcastRequest = serde_json::from_value(json!({
        "message": "hi",
        "sendToAll": true,
        "timeoutMs": 2500,
        "broadcastName": "Spring sale"
    }))
    .unwrap();

    assert!(req.send_to_all);
    assert_that!(req.timeout_ms, some(eq(2500)));
    assert_that!(req.broadcast_name, some(eq("Spring sale")));
}
