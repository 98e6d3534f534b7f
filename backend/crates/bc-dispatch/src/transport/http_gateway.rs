use crate::transport::{
    ChatId, ReadinessSignal, SendOptions, Transport, TransportError, TransportMessageId,
    TransportResult,
};

use bc_config::TransportConfig;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    ready: bool,
}

#[derive(Debug, Deserialize)]
struct NumberLookupResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    chat_id: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct MediaMessage<'a> {
    chat_id: &'a str,
    caption: &'a str,
    filename: String,
    mimetype: String,
    data: String,
}

/// REST client for a chat gateway bridge.
///
/// The gateway owns the authenticated session; this side only observes its
/// readiness through `GET /status` and relays lookups and sends.
pub struct HttpGatewayTransport {
    pub base_url: String,
    api_token: Option<String>,
    client: ReqwestClient,
    signal: ReadinessSignal,
}

impl HttpGatewayTransport {
    pub fn new(
        base_url: &str,
        api_token: Option<&str>,
        request_timeout: Duration,
    ) -> TransportResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.map(String::from),
            client,
            signal: ReadinessSignal::new(false),
        })
    }

    /// `Ok(None)` when no gateway URL is configured.
    pub fn from_config(config: &TransportConfig) -> TransportResult<Option<Self>> {
        let Some(base_url) = config.base_url.as_deref() else {
            return Ok(None);
        };

        Self::new(
            base_url,
            config.api_token.as_deref(),
            config.request_timeout(),
        )
        .map(Some)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref token) = self.api_token {
            req = req.bearer_auth(token);
        }

        req
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> TransportResult<reqwest::Response> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(TransportError::rejected(status.as_u16(), message));
        }

        Ok(response)
    }

    /// Pull `error.message` or `error` out of a failure body, else the raw text.
    async fn error_message(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        parsed
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .or_else(|| error.as_str())
            })
            .map(String::from)
            .unwrap_or(text)
    }

    /// Query the gateway once and publish the result on the readiness signal.
    pub async fn refresh_status(&self) -> TransportResult<bool> {
        let req = self.request(Method::GET, "/status");
        let status: StatusResponse = self.execute(req).await?.json().await?;

        if self.signal.set(status.ready) {
            if status.ready {
                info!("Transport session is ready");
            } else {
                warn!("Transport session is no longer ready");
            }
        }

        Ok(status.ready)
    }

    /// Poll `/status` every `interval`, marking the transport not-ready while
    /// the gateway is unreachable.
    pub fn spawn_status_watcher(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let transport = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = transport.refresh_status().await {
                    debug!("Transport status check failed: {}", e.summary());
                    if transport.signal.set(false) {
                        warn!("Transport gateway unreachable, marking not ready");
                    }
                }
            }
        })
    }

    pub fn signal(&self) -> &ReadinessSignal {
        &self.signal
    }
}

#[async_trait]
impl Transport for HttpGatewayTransport {
    fn readiness(&self) -> watch::Receiver<bool> {
        self.signal.subscribe()
    }

    fn is_ready(&self) -> bool {
        self.signal.is_ready()
    }

    async fn resolve_routable_id(&self, number: &str) -> TransportResult<Option<ChatId>> {
        let req = self.request(Method::GET, &format!("/numbers/{}", number));
        let response = req.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = Self::error_message(response).await;
            return Err(TransportError::rejected(status, message));
        }

        let lookup: NumberLookupResponse = response.json().await?;
        Ok(lookup.id.filter(|id| !id.is_empty()).map(ChatId))
    }

    async fn send(
        &self,
        chat_id: &ChatId,
        body: &str,
        options: &SendOptions,
    ) -> TransportResult<Option<TransportMessageId>> {
        let req = match options.media {
            Some(ref media) => {
                let payload = media.load().await?;
                self.request(Method::POST, "/messages/media")
                    .json(&MediaMessage {
                        chat_id: chat_id.as_str(),
                        caption: body,
                        filename: payload.filename,
                        mimetype: payload.mimetype,
                        data: payload.data,
                    })
            }
            None => self.request(Method::POST, "/messages").json(&TextMessage {
                chat_id: chat_id.as_str(),
                body,
            }),
        };

        let sent: SendResponse = self.execute(req).await?.json().await?;
        Ok(sent.id)
    }
}
