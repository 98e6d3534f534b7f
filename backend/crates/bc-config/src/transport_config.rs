use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_STATUS_POLL_INTERVAL_MS: u64 = 100;
pub const MAX_STATUS_POLL_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_STATUS_POLL_INTERVAL_MS: u64 = 2_000;

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Chat gateway the transport client talks to.
///
/// With no `base_url` the server starts without a transport and every send
/// reports the transport as not loaded.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    /// How often the gateway session status is refreshed
    pub status_poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            status_poll_interval_ms: DEFAULT_STATUS_POLL_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("status_poll_interval_ms", &self.status_poll_interval_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TransportConfig {
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_millis(self.status_poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref url) = self.base_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::transport(format!(
                "transport.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }

        if self.status_poll_interval_ms < MIN_STATUS_POLL_INTERVAL_MS
            || self.status_poll_interval_ms > MAX_STATUS_POLL_INTERVAL_MS
        {
            return Err(ConfigError::transport(format!(
                "transport.status_poll_interval_ms must be {}-{}, got {}",
                MIN_STATUS_POLL_INTERVAL_MS,
                MAX_STATUS_POLL_INTERVAL_MS,
                self.status_poll_interval_ms
            )));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::transport(format!(
                "transport.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        Ok(())
    }
}
