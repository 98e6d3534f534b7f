use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Transport request failed: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Transport rejected request with {status}: {message} {location}")]
    Rejected {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot read media file {path}: {source} {location}")]
    Media {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl TransportError {
    #[track_caller]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short description without the source location, used in results and the ledger.
    pub fn summary(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Rejected {
                status, message, ..
            } => format!("{} ({})", message, status),
            Self::Media { path, source, .. } => {
                format!("cannot read media {}: {}", path.display(), source)
            }
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
