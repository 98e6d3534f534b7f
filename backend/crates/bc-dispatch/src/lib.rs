//! Outbound broadcast engine: readiness gate, customer resolver,
//! bounded dispatcher and delivery ledger, plus the HTTP clients for the
//! chat gateway and the spreadsheet source.

pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod readiness_gate;
pub mod resolver;
pub mod retry;
pub mod sources;
pub mod store;
pub mod transport;

#[cfg(test)]
mod tests;

pub use dispatcher::{
    Dispatcher, FailureReason, PreparedRecipient, RecipientResult, RecipientTarget, SendOutcome,
};
pub use engine::{
    BroadcastEngine, BroadcastReport, BroadcastRequest, EngineSettings, SingleSendRequest,
    TransportStatus, deliver,
};
pub use error::{DispatchError, Result};
pub use ledger::DeliveryLedger;
pub use metrics::DispatchMetrics;
pub use readiness_gate::ReadinessGate;
pub use resolver::{CustomerResolver, CustomerSet, ResolveError};
pub use retry::{IsRetryable, RetryConfig, with_retry};
pub use sources::{GoogleSheetSource, PrimarySource, SheetRow, SourceError};
pub use store::{SecondaryStore, SqliteStore};
pub use transport::{
    ChatId, HttpGatewayTransport, MediaAttachment, ReadinessSignal, SendOptions, Transport,
    TransportError, TransportMessageId,
};
