use crate::resolver::ResolveError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport not configured {location}")]
    TransportNotConfigured { location: ErrorLocation },

    #[error("Transport not ready after {waited_ms}ms {location}")]
    TransportNotReady {
        waited_ms: u64,
        location: ErrorLocation,
    },

    #[error("No recipients to send to {location}")]
    NoRecipients { location: ErrorLocation },

    #[error("Too many recipients: {count} (max: {max}) {location}")]
    TooManyRecipients {
        count: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Cannot resolve recipients: {source} {location}")]
    Resolve {
        #[source]
        source: ResolveError,
        location: ErrorLocation,
    },
}

impl DispatchError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Only a readiness timeout is worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportNotReady { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::TransportNotConfigured { .. } => "TRANSPORT_NOT_CONFIGURED",
            Self::TransportNotReady { .. } => "TRANSPORT_NOT_READY",
            Self::NoRecipients { .. } => "NO_RECIPIENTS",
            Self::TooManyRecipients { .. } => "TOO_MANY_RECIPIENTS",
            Self::Resolve { .. } => "NO_DATA_SOURCE",
        }
    }
}

impl From<ResolveError> for DispatchError {
    #[track_caller]
    fn from(source: ResolveError) -> Self {
        Self::Resolve {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
