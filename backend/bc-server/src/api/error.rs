//! REST API error types
//!
//! Every failure leaves the server as `{ "error": { "code", "message" } }`
//! with a matching HTTP status.

use bc_db::DbError;
use bc_dispatch::{DispatchError, ResolveError};

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "TRANSPORT_NOT_READY")
    pub code: String,
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 400 with a specific code
    #[error("Bad request ({code}): {message} {location}")]
    BadRequest {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 503; the caller may retry later
    #[error("Service unavailable ({code}): {message} {location}")]
    Unavailable {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error ({code}): {message} {location}")]
    Internal {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal { .. } | ApiError::Unavailable { .. } => log::error!("{}", self),
            _ => log::warn!("{}", self),
        }

        let (status, body) = match self {
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::BadRequest { code, message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: code.into(),
                    message,
                    field: None,
                },
            ),
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Unavailable { code, message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: code.into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { code, message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: code.into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<DispatchError> for ApiError {
    #[track_caller]
    fn from(e: DispatchError) -> Self {
        let code = e.error_code();
        let location = ErrorLocation::from(Location::caller());

        match e {
            DispatchError::Validation { message, .. } => ApiError::Validation {
                message,
                field: None,
                location,
            },
            DispatchError::TransportNotReady { waited_ms, .. } => ApiError::Unavailable {
                code,
                message: format!("Transport not ready after {}ms", waited_ms),
                location,
            },
            DispatchError::TransportNotConfigured { .. } => ApiError::Internal {
                code,
                message: "Transport not configured".to_string(),
                location,
            },
            DispatchError::NoRecipients { .. } => ApiError::BadRequest {
                code,
                message: "No recipients to send to".to_string(),
                location,
            },
            DispatchError::TooManyRecipients { count, max, .. } => ApiError::BadRequest {
                code,
                message: format!("{} recipients exceeds the limit of {}", count, max),
                location,
            },
            DispatchError::Resolve { source, .. } => ApiError::from(source),
        }
    }
}

impl From<ResolveError> for ApiError {
    #[track_caller]
    fn from(e: ResolveError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            ResolveError::NoDataSource { .. } => ApiError::Internal {
                code: "NO_DATA_SOURCE",
                message: "No data source available (no sheet data and database not configured)"
                    .to_string(),
                location,
            },
            ResolveError::PrimaryNotConfigured { .. } => ApiError::Internal {
                code: "SHEET_NOT_CONFIGURED",
                message: "Customer sheet is not configured".to_string(),
                location,
            },
            ResolveError::Primary { source, .. } => {
                log::error!("Sheet error: {}", source);
                ApiError::Internal {
                    code: "SHEET_ERROR",
                    message: "Customer sheet request failed".to_string(),
                    location,
                }
            }
            ResolveError::Secondary { source, .. } => ApiError::from(source),
            ResolveError::Invalid { source, .. } => ApiError::Validation {
                message: match source {
                    bc_core::CoreError::Validation { message, .. } => message,
                    other => other.to_string(),
                },
                field: None,
                location,
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            code: "INTERNAL_ERROR",
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
