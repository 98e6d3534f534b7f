use crate::repositories::from_unix;
use crate::{DbError, Result as DbErrorResult};

use bc_core::{DeliveryRecord, DeliveryStatus, NewDeliveryRecord};

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

const TABLE: &str = "messages";

pub struct DeliveryRecordRepository;

impl DeliveryRecordRepository {
    /// Returns the new record id.
    pub async fn create<'e, E>(executor: E, record: &NewDeliveryRecord) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let now = Utc::now().timestamp();
        let attempted_at = record.attempted_at.timestamp();

        let row = sqlx::query(
            r#"
              INSERT INTO messages (
                  broadcast_id, customer_id, phone, body,
                  transport_message_id, status, error_text,
                  attempts, last_attempt_at, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              RETURNING id
              "#,
        )
        .bind(record.broadcast_id)
        .bind(record.customer_id)
        .bind(&record.phone)
        .bind(&record.body)
        .bind(&record.transport_message_id)
        .bind(record.status.as_str())
        .bind(&record.error_text)
        .bind(record.attempts)
        .bind(attempted_at)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(row.try_get("id")?)
    }

    /// Records for one broadcast in insertion order.
    pub async fn find_by_broadcast<'e, E>(
        executor: E,
        broadcast_id: i64,
    ) -> DbErrorResult<Vec<DeliveryRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
              SELECT id, broadcast_id, customer_id, phone, body,
                     transport_message_id, status, error_text,
                     attempts, last_attempt_at, created_at, updated_at
              FROM messages
              WHERE broadcast_id = ?
              ORDER BY id ASC
              "#,
        )
        .bind(broadcast_id)
        .fetch_all(executor)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Most recent records for a normalized number, newest first.
    pub async fn find_by_phone<'e, E>(
        executor: E,
        phone: &str,
        limit: i64,
    ) -> DbErrorResult<Vec<DeliveryRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
              SELECT id, broadcast_id, customer_id, phone, body,
                     transport_message_id, status, error_text,
                     attempts, last_attempt_at, created_at, updated_at
              FROM messages
              WHERE phone = ?
              ORDER BY id DESC
              LIMIT ?
              "#,
        )
        .bind(phone)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<DeliveryRecord> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<DeliveryStatus>()
            .map_err(|e| DbError::decode(TABLE, e.to_string()))?;
        let body: Option<String> = row.try_get("body")?;
        let last_attempt_at: Option<i64> = row.try_get("last_attempt_at")?;

        Ok(DeliveryRecord {
            id: row.try_get("id")?,
            broadcast_id: row.try_get("broadcast_id")?,
            customer_id: row.try_get("customer_id")?,
            phone: row.try_get("phone")?,
            body: body.unwrap_or_default(),
            transport_message_id: row.try_get("transport_message_id")?,
            status,
            error_text: row.try_get("error_text")?,
            attempts: row.try_get("attempts")?,
            last_attempt_at: last_attempt_at
                .map(|ts| from_unix(TABLE, ts))
                .transpose()?,
            created_at: from_unix(TABLE, row.try_get("created_at")?)?,
            updated_at: from_unix(TABLE, row.try_get("updated_at")?)?,
        })
    }
}
