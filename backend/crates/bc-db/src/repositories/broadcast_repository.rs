use crate::repositories::from_unix;
use crate::Result as DbErrorResult;

use bc_core::{Broadcast, NewBroadcast};

use chrono::Utc;
use sqlx::Row;

const TABLE: &str = "broadcasts";

pub struct BroadcastRepository;

impl BroadcastRepository {
    /// Returns the new broadcast id.
    pub async fn create<'e, E>(executor: E, broadcast: &NewBroadcast) -> DbErrorResult<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let created_at = Utc::now().timestamp();

        let row = sqlx::query(
            r#"
              INSERT INTO broadcasts (name, message, status, created_at)
              VALUES (?, ?, ?, ?)
              RETURNING id
              "#,
        )
        .bind(&broadcast.name)
        .bind(&broadcast.message)
        .bind(&broadcast.status)
        .bind(created_at)
        .fetch_one(executor)
        .await?;

        Ok(row.try_get("id")?)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> DbErrorResult<Option<Broadcast>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
              SELECT id, name, message, status, created_at
              FROM broadcasts
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: Option<String> = row.try_get("name")?;
        let message: Option<String> = row.try_get("message")?;

        Ok(Some(Broadcast {
            id: row.try_get("id")?,
            name: name.unwrap_or_default(),
            message: message.unwrap_or_default(),
            status: row.try_get("status")?,
            created_at: from_unix(TABLE, row.try_get("created_at")?)?,
        }))
    }
}
