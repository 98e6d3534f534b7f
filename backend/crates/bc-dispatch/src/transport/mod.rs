mod error;
mod http_gateway;
pub(crate) mod media;
mod readiness_signal;

pub use error::{Result as TransportResult, TransportError};
pub use http_gateway::HttpGatewayTransport;
pub use media::{MediaAttachment, MediaPayload};
pub use readiness_signal::ReadinessSignal;

use std::fmt;

use async_trait::async_trait;
use tokio::sync::watch;

/// Identifier assigned by the transport to a message it accepted
pub type TransportMessageId = String;

/// Transport-side address for a number that is known to be reachable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatId(pub String);

impl ChatId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// When set, the body is sent as the attachment caption
    pub media: Option<MediaAttachment>,
}

/// A chat-messaging session that can deliver to numbers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Subscribe to readiness transitions; `true` means authenticated and usable.
    fn readiness(&self) -> watch::Receiver<bool>;

    fn is_ready(&self) -> bool {
        *self.readiness().borrow()
    }

    /// `Ok(None)` when the number is not registered on the transport.
    async fn resolve_routable_id(&self, number: &str) -> TransportResult<Option<ChatId>>;

    /// Gateways are not required to assign an id, hence the `Option`.
    async fn send(
        &self,
        chat_id: &ChatId,
        body: &str,
        options: &SendOptions,
    ) -> TransportResult<Option<TransportMessageId>>;
}
