pub mod connection;
pub mod error;
pub mod repositories;

#[cfg(test)]
mod tests;

pub use connection::database::{open_in_memory, open_pool, ping, run_migrations};
pub use error::{DbError, Result};
pub use repositories::broadcast_repository::BroadcastRepository;
pub use repositories::customer_repository::CustomerRepository;
pub use repositories::delivery_record_repository::DeliveryRecordRepository;
