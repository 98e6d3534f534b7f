use crate::NumbersInput;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SendBroadcastRequest {
    #[serde(default)]
    pub numbers: Option<NumbersInput>,

    #[serde(default)]
    pub message: String,

    /// Local file sent to every recipient, with `message` as the caption
    #[serde(default, alias = "mediaPath")]
    pub media_path: Option<String>,

    /// Parallel sends; missing or < 1 uses the configured default
    #[serde(default)]
    pub concurrency: Option<i64>,

    #[serde(default, alias = "timeoutMs")]
    pub timeout_ms: Option<u64>,

    #[serde(default, alias = "broadcastName")]
    pub broadcast_name: Option<String>,

    /// Ignore `numbers` and send to every known customer
    #[serde(default, alias = "sendToAll")]
    pub send_to_all: bool,
}

impl SendBroadcastRequest {
    /// Values below 1 fall back to the configured default.
    pub fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency
            .filter(|c| *c >= 1)
            .and_then(|c| usize::try_from(c).ok())
    }
}
