use crate::dispatcher::{
    Dispatcher, FailureReason, PreparedRecipient, RecipientResult, RecipientTarget, SendOutcome,
};
use crate::ledger::DeliveryLedger;
use crate::metrics::DispatchMetrics;
use crate::readiness_gate::ReadinessGate;
use crate::resolver::{CustomerResolver, CustomerSet, Result as ResolveResult};
use crate::sources::SheetRow;
use crate::transport::{MediaAttachment, SendOptions, Transport};
use crate::{DispatchError, Result as DispatchResult};

use bc_config::Config;
use bc_core::{Customer, CustomerSource, NewCustomer, NewDeliveryRecord};

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use log::{info, warn};
use serde::Serialize;
use tracing::Instrument;

/// Tunables taken from configuration at startup
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub default_timeout: Duration,
    pub media_timeout: Duration,
    pub default_concurrency: usize,
    pub max_recipients: usize,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_timeout: config.readiness.default_timeout(),
            media_timeout: config.readiness.media_timeout(),
            default_concurrency: config.dispatch.default_concurrency,
            max_recipients: config.dispatch.max_recipients,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BroadcastRequest {
    /// `None` sends to every customer the resolver returns; an empty list is
    /// rejected with `NoRecipients`
    pub recipients: Option<Vec<String>>,
    pub message: String,
    pub media: Option<MediaAttachment>,
    pub concurrency: Option<usize>,
    pub name: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastReport {
    pub broadcast_id: Option<i64>,
    pub results: Vec<RecipientResult>,
}

impl BroadcastReport {
    pub fn sent_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_sent()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.sent_count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SingleSendRequest {
    pub number: String,
    pub message: String,
    pub media: Option<MediaAttachment>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportStatus {
    /// A transport is configured
    pub loaded: bool,
    pub ready: bool,
}

/// Entry point tying the gate, resolver, dispatcher and ledger together.
pub struct BroadcastEngine {
    transport: Option<Arc<dyn Transport>>,
    resolver: Arc<CustomerResolver>,
    ledger: DeliveryLedger,
    dispatcher: Dispatcher,
    settings: EngineSettings,
    metrics: DispatchMetrics,
}

impl BroadcastEngine {
    pub fn new(
        transport: Option<Arc<dyn Transport>>,
        resolver: Arc<CustomerResolver>,
        ledger: DeliveryLedger,
        settings: EngineSettings,
        metrics: DispatchMetrics,
    ) -> Self {
        let dispatcher = Dispatcher::new(settings.default_concurrency, metrics.clone());

        Self {
            transport,
            resolver,
            ledger,
            dispatcher,
            settings,
            metrics,
        }
    }

    pub async fn dispatch_broadcast(&self, request: BroadcastRequest) -> DispatchResult<BroadcastReport> {
        Self::check_message(&request.message, request.media.as_ref())?;
        let transport = self.transport()?;

        let targets = match request.recipients {
            Some(ref numbers) => numbers.iter().map(RecipientTarget::new).collect::<Vec<_>>(),
            None => Self::targets_from(self.resolver.get_customers(false).await?),
        };

        if targets.is_empty() {
            return Err(DispatchError::NoRecipients {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if targets.len() > self.settings.max_recipients {
            return Err(DispatchError::TooManyRecipients {
                count: targets.len(),
                max: self.settings.max_recipients,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.wait_until_ready(&transport, request.timeout, request.media.is_some())
            .await?;

        let broadcast_id = self
            .ledger
            .open_broadcast(request.name.as_deref(), &request.message)
            .await;

        let span = tracing::info_span!(
            "broadcast",
            broadcast_id = ?broadcast_id,
            recipients = targets.len(),
        );

        let recipients = targets.len();
        let limit = request.concurrency.unwrap_or(0);
        let results = self
            .run(
                transport,
                targets,
                request.message,
                request.media,
                broadcast_id,
                limit,
            )
            .instrument(span)
            .await;

        self.metrics.broadcast_dispatched(recipients);

        let report = BroadcastReport {
            broadcast_id,
            results,
        };
        info!(
            "Broadcast {:?} finished: {} sent, {} failed",
            report.broadcast_id,
            report.sent_count(),
            report.failed_count()
        );

        Ok(report)
    }

    /// Same pipeline for one number; the ledger row carries no broadcast id.
    pub async fn send_single(&self, request: SingleSendRequest) -> DispatchResult<RecipientResult> {
        if request.number.trim().is_empty() {
            return Err(DispatchError::validation("number is required"));
        }
        Self::check_message(&request.message, request.media.as_ref())?;
        let transport = self.transport()?;

        self.wait_until_ready(&transport, request.timeout, request.media.is_some())
            .await?;

        let mut results = self
            .run(
                transport,
                vec![RecipientTarget::new(request.number)],
                request.message,
                request.media,
                None,
                1,
            )
            .await;

        results.pop().ok_or_else(|| DispatchError::NoRecipients {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn get_customers(&self, force: bool) -> ResolveResult<CustomerSet> {
        self.resolver.get_customers(force).await
    }

    pub async fn add_customer(&self, customer: &NewCustomer) -> ResolveResult<Customer> {
        self.resolver.add_customer(customer).await
    }

    pub async fn append_primary(&self, row: &SheetRow) -> ResolveResult<()> {
        self.resolver.append_primary(row).await
    }

    pub fn transport_status(&self) -> TransportStatus {
        match self.transport {
            Some(ref transport) => TransportStatus {
                loaded: true,
                ready: transport.is_ready(),
            },
            None => TransportStatus {
                loaded: false,
                ready: false,
            },
        }
    }

    fn transport(&self) -> DispatchResult<Arc<dyn Transport>> {
        self.transport
            .clone()
            .ok_or_else(|| DispatchError::TransportNotConfigured {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn check_message(message: &str, media: Option<&MediaAttachment>) -> DispatchResult<()> {
        if message.trim().is_empty() && media.is_none() {
            return Err(DispatchError::validation("message is required"));
        }
        Ok(())
    }

    fn targets_from(set: CustomerSet) -> Vec<RecipientTarget> {
        set.records
            .iter()
            .map(|customer| {
                // Only database rows have ids the ledger can reference
                let customer_id = match set.source {
                    CustomerSource::Secondary => customer.id,
                    CustomerSource::Primary => None,
                };
                RecipientTarget::for_customer(customer.phone.clone().unwrap_or_default(), customer_id)
            })
            .collect()
    }

    async fn wait_until_ready(
        &self,
        transport: &Arc<dyn Transport>,
        timeout: Option<Duration>,
        has_media: bool,
    ) -> DispatchResult<()> {
        let timeout = timeout.unwrap_or(if has_media {
            self.settings.media_timeout
        } else {
            self.settings.default_timeout
        });

        let gate = ReadinessGate::new(transport.readiness(), self.metrics.clone());
        let started = Instant::now();

        if gate.ensure_ready(timeout).await {
            Ok(())
        } else {
            Err(DispatchError::TransportNotReady {
                waited_ms: started.elapsed().as_millis() as u64,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    /// Dispatch and record every outcome.
    ///
    /// Attempted sends are recorded inside their own task; recipients that
    /// never reached the transport are recorded afterwards.
    async fn run(
        &self,
        transport: Arc<dyn Transport>,
        targets: Vec<RecipientTarget>,
        message: String,
        media: Option<MediaAttachment>,
        broadcast_id: Option<i64>,
        limit: usize,
    ) -> Vec<RecipientResult> {
        let body: Arc<str> = Arc::from(message);
        let options = Arc::new(SendOptions { media });
        let ledger = self.ledger.clone();

        let send = {
            let body = Arc::clone(&body);
            move |recipient: PreparedRecipient| {
                let transport = Arc::clone(&transport);
                let ledger = ledger.clone();
                let body = Arc::clone(&body);
                let options = Arc::clone(&options);

                async move {
                    let outcome = deliver(transport.as_ref(), &recipient.number, &body, &options).await;
                    ledger
                        .record(&ledger_entry(broadcast_id, &recipient, &body, &outcome))
                        .await;
                    outcome
                }
            }
        };

        let results = self.dispatcher.broadcast(targets, send, limit).await;

        for result in results
            .iter()
            .filter(|r| matches!(r.reason, Some(FailureReason::InvalidNumber | FailureReason::TaskFailed)))
        {
            let phone = if result.number.is_empty() {
                result.recipient.as_str()
            } else {
                result.number.as_str()
            };
            let error_text = result
                .error
                .clone()
                .unwrap_or_else(|| result.reason.map(|r| r.to_string()).unwrap_or_default());

            self.ledger
                .record(&NewDeliveryRecord::failed(
                    broadcast_id,
                    result.customer_id,
                    phone,
                    &body,
                    error_text,
                ))
                .await;
        }

        results
    }
}

/// Resolve the number on the transport, then send.
pub async fn deliver(
    transport: &dyn Transport,
    number: &str,
    body: &str,
    options: &SendOptions,
) -> SendOutcome {
    let chat_id = match transport.resolve_routable_id(number).await {
        Ok(Some(chat_id)) => chat_id,
        Ok(None) => {
            return SendOutcome::Failed {
                reason: FailureReason::NotRegistered,
                error: None,
            };
        }
        Err(e) => {
            warn!("Number lookup failed for {}: {}", number, e);
            return SendOutcome::Failed {
                reason: FailureReason::SendFailed,
                error: Some(e.summary()),
            };
        }
    };

    match transport.send(&chat_id, body, options).await {
        Ok(message_id) => SendOutcome::Sent { message_id },
        Err(e) => {
            warn!("Send to {} failed: {}", number, e);
            SendOutcome::Failed {
                reason: FailureReason::SendFailed,
                error: Some(e.summary()),
            }
        }
    }
}

fn ledger_entry(
    broadcast_id: Option<i64>,
    recipient: &PreparedRecipient,
    body: &str,
    outcome: &SendOutcome,
) -> NewDeliveryRecord {
    match outcome {
        SendOutcome::Sent { message_id } => NewDeliveryRecord::sent(
            broadcast_id,
            recipient.customer_id,
            &recipient.number,
            body,
            message_id.clone(),
        ),
        SendOutcome::Failed { reason, error } => NewDeliveryRecord::failed(
            broadcast_id,
            recipient.customer_id,
            &recipient.number,
            body,
            error.clone().unwrap_or_else(|| reason.to_string()),
        ),
    }
}
