use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 120;

/// How long callers wait for the transport session to become usable
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub default_timeout_secs: u64,
    /// Media sends tolerate a longer cold start
    pub media_timeout_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: DEFAULT_TIMEOUT_SECS,
            media_timeout_secs: DEFAULT_MEDIA_TIMEOUT_SECS,
        }
    }
}

impl ReadinessConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn media_timeout(&self) -> Duration {
        Duration::from_secs(self.media_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, value) in [
            ("default_timeout_secs", self.default_timeout_secs),
            ("media_timeout_secs", self.media_timeout_secs),
        ] {
            if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&value) {
                return Err(ConfigError::config(format!(
                    "readiness.{} must be {}-{}, got {}",
                    name, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, value
                )));
            }
        }

        Ok(())
    }
}
