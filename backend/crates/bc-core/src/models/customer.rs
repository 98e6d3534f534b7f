use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact that can receive broadcasts.
///
/// Rows read from the spreadsheet source have no `id` or `created_at`;
/// columns that don't map onto a known field are kept in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields accepted when inserting a customer into the database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub metadata: Option<Value>,
}

impl NewCustomer {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Default::default()
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.phone.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "phone is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
