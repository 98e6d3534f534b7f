use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_TTL_SECS: u64 = 1;
pub const MAX_TTL_SECS: u64 = 3600;
pub const DEFAULT_TTL_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of the cached spreadsheet rows
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.ttl_secs < MIN_TTL_SECS || self.ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::config(format!(
                "cache.ttl_secs must be {}-{}, got {}",
                MIN_TTL_SECS, MAX_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }
}
