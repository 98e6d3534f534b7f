use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 50;
pub const DEFAULT_CONCURRENCY: usize = 5;

pub const MIN_MAX_RECIPIENTS: usize = 1;
pub const MAX_MAX_RECIPIENTS: usize = 100_000;
pub const DEFAULT_MAX_RECIPIENTS: usize = 5_000;

/// Fan-out limits for broadcasts.
///
/// `default_concurrency` bounds simultaneous in-flight sends against the
/// single shared transport session when a request doesn't name its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub default_concurrency: usize,
    /// Upper bound on recipients accepted in one broadcast request
    pub max_recipients: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_concurrency: DEFAULT_CONCURRENCY,
            max_recipients: DEFAULT_MAX_RECIPIENTS,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.default_concurrency < MIN_CONCURRENCY || self.default_concurrency > MAX_CONCURRENCY
        {
            return Err(ConfigError::config(format!(
                "dispatch.default_concurrency must be {}-{}, got {}",
                MIN_CONCURRENCY, MAX_CONCURRENCY, self.default_concurrency
            )));
        }

        if self.max_recipients < MIN_MAX_RECIPIENTS || self.max_recipients > MAX_MAX_RECIPIENTS {
            return Err(ConfigError::config(format!(
                "dispatch.max_recipients must be {}-{}, got {}",
                MIN_MAX_RECIPIENTS, MAX_MAX_RECIPIENTS, self.max_recipients
            )));
        }

        Ok(())
    }
}
