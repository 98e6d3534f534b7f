pub mod broadcast_repository;
pub mod customer_repository;
pub mod delivery_record_repository;

use crate::{DbError, Result as DbErrorResult};

use chrono::{DateTime, Utc};

pub(crate) fn from_unix(table: &'static str, ts: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| DbError::decode(table, format!("timestamp out of range: {}", ts)))
}
