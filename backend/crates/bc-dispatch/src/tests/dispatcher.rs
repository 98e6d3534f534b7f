use crate::{DispatchMetrics, Dispatcher, FailureReason, RecipientTarget, SendOutcome};

use bc_core::DeliveryStatus;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use googletest::prelude::*;
use proptest::prelude::*;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(5, DispatchMetrics::new())
}

fn targets(raw: &[&str]) -> Vec<RecipientTarget> {
    raw.iter().map(|r| RecipientTarget::new(*r)).collect()
}

fn sent(number: &str) -> SendOutcome {
    SendOutcome::Sent {
        message_id: Some(format!("msg-{}", number)),
    }
}

#[tokio::test]
async fn given_valid_and_garbage_numbers_when_broadcast_then_garbage_never_reaches_send() {
    // Given
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let send = move |recipient: crate::PreparedRecipient| {
        let counted = Arc::clone(&counted);
        async move {
            counted.fetch_add(1, Ordering::SeqCst);
            sent(&recipient.number)
        }
    };

    // When
    let results = dispatcher()
        .broadcast(targets(&["+1 (555) 000-1111", "abc"]), send, 1)
        .await;

    // Then
    assert_that!(results.len(), eq(2));
    assert_that!(calls.load(Ordering::SeqCst), eq(1));

    assert_that!(results[0].number, eq("15550001111"));
    assert_that!(results[0].recipient, eq("+1 (555) 000-1111"));
    assert_that!(results[0].status, eq(DeliveryStatus::Sent));
    assert_that!(results[0].message_id, some(eq("msg-15550001111")));

    assert_that!(results[1].number, eq(""));
    assert_that!(results[1].status, eq(DeliveryStatus::Failed));
    assert_that!(results[1].reason, some(eq(FailureReason::InvalidNumber)));
}

#[tokio::test]
async fn given_limit_when_broadcast_then_in_flight_never_exceeds_it() {
    // Given
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (in_flight_c, peak_c) = (Arc::clone(&in_flight), Arc::clone(&peak));
    let send = move |recipient: crate::PreparedRecipient| {
        let in_flight = Arc::clone(&in_flight_c);
        let peak = Arc::clone(&peak_c);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            sent(&recipient.number)
        }
    };
    let numbers: Vec<String> = (0..40).map(|i| format!("2010000{:04}", i)).collect();
    let targets = numbers.iter().map(RecipientTarget::new).collect();

    // When
    let results = dispatcher().broadcast(targets, send, 3).await;

    // Then
    assert_that!(results.len(), eq(40));
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(peak.load(Ordering::SeqCst) >= 1);
    assert!(results.iter().all(|r| r.is_sent()));
}

#[tokio::test]
async fn given_zero_limit_when_broadcast_then_default_limit_applies() {
    // Given
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (in_flight_c, peak_c) = (Arc::clone(&in_flight), Arc::clone(&peak));
    let send = move |recipient: crate::PreparedRecipient| {
        let in_flight = Arc::clone(&in_flight_c);
        let peak = Arc::clone(&peak_c);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            sent(&recipient.number)
        }
    };
    let numbers: Vec<String> = (0..20).map(|i| format!("1555{:04}", i)).collect();

    // When
    let results = Dispatcher::new(2, DispatchMetrics::new())
        .broadcast(numbers.iter().map(RecipientTarget::new).collect(), send, 0)
        .await;

    // Then
    assert_that!(results.len(), eq(20));
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[test]
fn given_zero_limit_then_effective_limit_is_default() {
    let dispatcher = Dispatcher::new(5, DispatchMetrics::new());

    assert_that!(dispatcher.effective_limit(0), eq(5));
    assert_that!(dispatcher.effective_limit(12), eq(12));
}

#[test]
fn given_zero_default_then_effective_limit_is_one() {
    let dispatcher = Dispatcher::new(0, DispatchMetrics::new());

    assert_that!(dispatcher.effective_limit(0), eq(1));
}

#[tokio::test]
async fn given_panicking_send_when_broadcast_then_only_that_recipient_fails() {
    // Given
    let send = |recipient: crate::PreparedRecipient| async move {
        if recipient.number == "222" {
            panic!("transport exploded");
        }
        sent(&recipient.number)
    };

    // When
    let results = dispatcher()
        .broadcast(targets(&["111", "222", "333"]), send, 2)
        .await;

    // Then
    assert_that!(results.len(), eq(3));
    assert_that!(results[0].status, eq(DeliveryStatus::Sent));
    assert_that!(results[1].reason, some(eq(FailureReason::TaskFailed)));
    assert_that!(results[1].error, some(contains_substring("transport exploded")));
    assert_that!(results[2].status, eq(DeliveryStatus::Sent));
}

#[test]
fn given_release_profile_then_panics_unwind_into_task_failed() {
    let manifest: toml::Table = toml::from_str(include_str!("../../../../../Cargo.toml")).unwrap();

    let panic = manifest
        .get("profile")
        .and_then(|profile| profile.get("release"))
        .and_then(|release| release.get("panic"))
        .and_then(|panic| panic.as_str());

    assert_that!(panic.unwrap_or("unwind"), eq("unwind"));
}

#[tokio::test]
async fn given_failed_outcomes_when_broadcast_then_reason_and_error_are_kept() {
    let send = |recipient: crate::PreparedRecipient| async move {
        match recipient.number.as_str() {
            "111" => SendOutcome::Failed {
                reason: FailureReason::NotRegistered,
                error: None,
            },
            _ => SendOutcome::Failed {
                reason: FailureReason::SendFailed,
                error: Some("rate limited".to_string()),
            },
        }
    };

    let results = dispatcher().broadcast(targets(&["111", "222"]), send, 5).await;

    assert_that!(results[0].reason, some(eq(FailureReason::NotRegistered)));
    assert_that!(results[0].error, none());
    assert_that!(results[1].reason, some(eq(FailureReason::SendFailed)));
    assert_that!(results[1].error, some(eq("rate limited")));
}

#[tokio::test]
async fn given_customer_ids_when_broadcast_then_results_carry_them() {
    let send = |recipient: crate::PreparedRecipient| async move { sent(&recipient.number) };

    let results = dispatcher()
        .broadcast(
            vec![RecipientTarget::for_customer("15550001111", Some(7))],
            send,
            1,
        )
        .await;

    assert_that!(results[0].customer_id, some(eq(7)));
}

#[tokio::test]
async fn given_no_targets_when_broadcast_then_no_results() {
    let send = |recipient: crate::PreparedRecipient| async move { sent(&recipient.number) };

    let results = dispatcher().broadcast(Vec::new(), send, 1).await;

    assert_that!(results, is_empty());
}

#[test]
fn given_result_when_serialized_then_camel_case_without_empty_fields() {
    let result = crate::RecipientResult {
        recipient: "+1 555".to_string(),
        number: "1555".to_string(),
        status: DeliveryStatus::Sent,
        reason: None,
        error: None,
        message_id: Some("abc".to_string()),
        customer_id: Some(3),
    };

    let json = serde_json::to_value(&result).unwrap();

    assert_that!(json["messageId"].as_str(), some(eq("abc")));
    assert_that!(json["status"].as_str(), some(eq("sent")));
    assert!(json.get("reason").is_none());
    assert!(json.get("customerId").is_none());
}

proptest! {
    #[test]
    fn given_any_inputs_when_broadcast_then_one_result_per_input(
        raw in proptest::collection::vec("[0-9a-z +()-]{0,12}", 0..25),
        limit in 0usize..8,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let targets: Vec<RecipientTarget> = raw.iter().map(RecipientTarget::new).collect();
        let send = |recipient: crate::PreparedRecipient| async move {
            if recipient.number.ends_with('7') {
                SendOutcome::Failed { reason: FailureReason::SendFailed, error: None }
            } else {
                sent(&recipient.number)
            }
        };

        let results = runtime.block_on(dispatcher().broadcast(targets, send, limit));

        prop_assert_eq!(results.len(), raw.len());
        for (result, input) in results.iter().zip(raw.iter()) {
            prop_assert_eq!(&result.recipient, input);
        }
    }
}
