use bc_core::{Customer, NewBroadcast, NewCustomer, NewDeliveryRecord};
use bc_db::{
    BroadcastRepository, CustomerRepository, DeliveryRecordRepository,
    Result as DbErrorResult,
};

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Relational fallback for customers and home of the delivery ledger.
#[async_trait]
pub trait SecondaryStore: Send + Sync {
    async fn insert_customer(&self, customer: &NewCustomer) -> DbErrorResult<Customer>;

    async fn list_customers(&self) -> DbErrorResult<Vec<Customer>>;

    /// Returns the new broadcast id.
    async fn insert_broadcast(&self, broadcast: &NewBroadcast) -> DbErrorResult<i64>;

    /// Returns the new record id.
    async fn insert_delivery_record(&self, record: &NewDeliveryRecord) -> DbErrorResult<i64>;
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SecondaryStore for SqliteStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> DbErrorResult<Customer> {
        CustomerRepository::create(&self.pool, customer).await
    }

    async fn list_customers(&self) -> DbErrorResult<Vec<Customer>> {
        CustomerRepository::find_all(&self.pool).await
    }

    async fn insert_broadcast(&self, broadcast: &NewBroadcast) -> DbErrorResult<i64> {
        BroadcastRepository::create(&self.pool, broadcast).await
    }

    async fn insert_delivery_record(&self, record: &NewDeliveryRecord) -> DbErrorResult<i64> {
        DeliveryRecordRepository::create(&self.pool, record).await
    }
}
