use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BROADCAST_NAME: &str = "Broadcast";
pub const BROADCAST_STATUS_SENDING: &str = "sending";

/// One logical request to send the same message to a set of recipients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: i64,
    pub name: String,
    pub message: String,
    /// Informational only; no transitions are enforced
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBroadcast {
    pub name: String,
    pub message: String,
    pub status: String,
}

impl NewBroadcast {
    pub fn new(name: Option<&str>, message: &str) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_BROADCAST_NAME);

        Self {
            name: name.to_string(),
            message: message.to_string(),
            status: BROADCAST_STATUS_SENDING.to_string(),
        }
    }
}
