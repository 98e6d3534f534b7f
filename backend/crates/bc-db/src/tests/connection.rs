use crate::{open_in_memory, open_pool, ping};

use googletest::prelude::*;
use sqlx::Row;

#[tokio::test]
async fn given_in_memory_pool_when_ping_then_ok() {
    let pool = open_in_memory().await.unwrap();

    assert_that!(ping(&pool).await, ok(anything()));
}

#[tokio::test]
async fn given_in_memory_pool_then_foreign_keys_are_enforced() {
    let pool = open_in_memory().await.unwrap();

    let row = sqlx::query("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    let enabled: i64 = row.try_get(0).unwrap();

    assert_that!(enabled, eq(1));
}

#[tokio::test]
async fn given_nested_missing_directory_when_open_pool_then_file_is_created() {
    let temp = tempfile::TempDir::new().unwrap();
    let db_path = temp.path().join("data").join("broadcasts.db");

    let pool = open_pool(&db_path).await.unwrap();
    ping(&pool).await.unwrap();

    assert!(db_path.exists());
}

#[tokio::test]
async fn given_existing_database_when_reopened_then_migrations_are_idempotent() {
    let temp = tempfile::TempDir::new().unwrap();
    let db_path = temp.path().join("broadcasts.db");

    let first = open_pool(&db_path).await.unwrap();
    first.close().await;

    let second = open_pool(&db_path).await;

    assert_that!(second, ok(anything()));
}
