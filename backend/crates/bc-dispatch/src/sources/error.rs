use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Primary source not configured: {message} {location}")]
    NotConfigured {
        message: String,
        location: ErrorLocation,
    },

    #[error("Primary source authentication failed: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    #[error("Primary source request failed: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Primary source returned {status}: {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },
}

impl SourceError {
    #[track_caller]
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
