use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid delivery status: {value} {location}")]
    InvalidDeliveryStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid customer source: {value} {location}")]
    InvalidCustomerSource {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
