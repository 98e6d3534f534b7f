use crate::metrics::DispatchMetrics;

use bc_core::{DeliveryStatus, normalize_number};

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use log::{error, warn};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Why a recipient did not receive the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Normalized to an empty string; never sent
    InvalidNumber,
    /// The transport does not know the number
    NotRegistered,
    SendFailed,
    /// The send task panicked or was lost
    TaskFailed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidNumber => "invalid_number",
            Self::NotRegistered => "not_registered",
            Self::SendFailed => "send_failed",
            Self::TaskFailed => "task_failed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipient as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientTarget {
    pub recipient: String,
    pub customer_id: Option<i64>,
}

impl RecipientTarget {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            customer_id: None,
        }
    }

    pub fn for_customer(recipient: impl Into<String>, customer_id: Option<i64>) -> Self {
        Self {
            recipient: recipient.into(),
            customer_id,
        }
    }
}

/// A target whose number normalized to something non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRecipient {
    pub recipient: String,
    pub number: String,
    pub customer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent {
        message_id: Option<String>,
    },
    Failed {
        reason: FailureReason,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientResult {
    /// The raw input
    pub recipient: String,
    pub number: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip)]
    pub customer_id: Option<i64>,
}

impl RecipientResult {
    fn from_outcome(prepared: PreparedRecipient, outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Sent { message_id } => Self {
                recipient: prepared.recipient,
                number: prepared.number,
                status: DeliveryStatus::Sent,
                reason: None,
                error: None,
                message_id,
                customer_id: prepared.customer_id,
            },
            SendOutcome::Failed { reason, error } => {
                Self::failed(prepared.recipient, prepared.number, prepared.customer_id, reason, error)
            }
        }
    }

    fn failed(
        recipient: String,
        number: String,
        customer_id: Option<i64>,
        reason: FailureReason,
        error: Option<String>,
    ) -> Self {
        Self {
            recipient,
            number,
            status: DeliveryStatus::Failed,
            reason: Some(reason),
            error,
            message_id: None,
            customer_id,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status == DeliveryStatus::Sent
    }
}

/// Fans a send out over many recipients with a bounded number in flight.
#[derive(Clone)]
pub struct Dispatcher {
    default_limit: usize,
    metrics: DispatchMetrics,
}

impl Dispatcher {
    pub fn new(default_limit: usize, metrics: DispatchMetrics) -> Self {
        Self {
            default_limit: default_limit.max(1),
            metrics,
        }
    }

    /// `limit < 1` falls back to the configured default.
    pub fn effective_limit(&self, limit: usize) -> usize {
        if limit < 1 { self.default_limit } else { limit }
    }

    /// Run `send` for every target, at most `limit` at a time.
    ///
    /// Returns exactly one result per target, in input order. Targets whose
    /// number normalizes to nothing fail with `invalid_number` and `send` is
    /// never called for them. A panicking send yields `task_failed` for that
    /// target only.
    pub async fn broadcast<F, Fut>(
        &self,
        targets: Vec<RecipientTarget>,
        send: F,
        limit: usize,
    ) -> Vec<RecipientResult>
    where
        F: Fn(PreparedRecipient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SendOutcome> + Send + 'static,
    {
        let limit = self.effective_limit(limit);
        let semaphore = Arc::new(Semaphore::new(limit));
        let send = Arc::new(send);
        let mut tasks = JoinSet::new();

        // Placeholders stay in place only if a task never reports back
        let mut results: Vec<RecipientResult> = Vec::with_capacity(targets.len());

        for (index, target) in targets.into_iter().enumerate() {
            let prepared = PreparedRecipient {
                number: normalize_number(&target.recipient),
                recipient: target.recipient,
                customer_id: target.customer_id,
            };

            if prepared.number.is_empty() {
                self.metrics
                    .send_failed(FailureReason::InvalidNumber.as_str());
                results.push(RecipientResult::failed(
                    prepared.recipient,
                    prepared.number,
                    prepared.customer_id,
                    FailureReason::InvalidNumber,
                    None,
                ));
                continue;
            }

            results.push(RecipientResult::failed(
                prepared.recipient.clone(),
                prepared.number.clone(),
                prepared.customer_id,
                FailureReason::TaskFailed,
                Some("send task did not complete".to_string()),
            ));

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("Dispatch semaphore closed: {}", e);
                    self.metrics.send_failed(FailureReason::TaskFailed.as_str());
                    continue;
                }
            };

            let send = Arc::clone(&send);
            let metrics = self.metrics.clone();

            tasks.spawn(async move {
                let _permit = permit;
                metrics.send_started();
                let started = Instant::now();

                let outcome = AssertUnwindSafe(async { send(prepared.clone()).await })
                    .catch_unwind()
                    .await;

                metrics.send_finished(started.elapsed());

                let result = match outcome {
                    Ok(outcome) => RecipientResult::from_outcome(prepared, outcome),
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        error!("Send task for {} panicked: {}", prepared.number, message);
                        RecipientResult::failed(
                            prepared.recipient,
                            prepared.number,
                            prepared.customer_id,
                            FailureReason::TaskFailed,
                            Some(message),
                        )
                    }
                };

                match result.reason {
                    None => metrics.send_succeeded(),
                    Some(reason) => metrics.send_failed(reason.as_str()),
                }

                (index, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = result,
                Err(e) => {
                    warn!("Send task lost: {}", e);
                    self.metrics.send_failed(FailureReason::TaskFailed.as_str());
                }
            }
        }

        results
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "send task panicked".to_string()
    }
}
