use crate::repositories::from_unix;
use crate::{DbError, Result as DbErrorResult};

use bc_core::{Customer, NewCustomer};

use chrono::Utc;
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

const TABLE: &str = "customers";

pub struct CustomerRepository;

impl CustomerRepository {
    /// Insert a customer and return the stored row.
    pub async fn create<'e, E>(executor: E, customer: &NewCustomer) -> DbErrorResult<Customer>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let now = Utc::now().timestamp();
        let metadata = customer
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::decode(TABLE, e.to_string()))?;

        let row = sqlx::query(
            r#"
              INSERT INTO customers (name, phone, email, metadata, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              RETURNING id, name, phone, email, metadata, created_at
              "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(metadata)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Self::map_row(&row)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> DbErrorResult<Option<Customer>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            r#"
              SELECT id, name, phone, email, metadata, created_at
              FROM customers
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Newest first.
    pub async fn find_all<'e, E>(executor: E) -> DbErrorResult<Vec<Customer>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query(
            r#"
              SELECT id, name, phone, email, metadata, created_at
              FROM customers
              ORDER BY created_at DESC, id DESC
              "#,
        )
        .fetch_all(executor)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<Customer> {
        let metadata: Option<String> = row.try_get("metadata")?;
        let metadata = match metadata {
            Some(text) => serde_json::from_str::<Value>(&text)
                .map_err(|e| DbError::decode(TABLE, format!("metadata: {}", e)))?,
            None => Value::Null,
        };

        Ok(Customer {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            phone: Some(row.try_get("phone")?),
            email: row.try_get("email")?,
            metadata,
            created_at: Some(from_unix(TABLE, row.try_get("created_at")?)?),
        })
    }
}
