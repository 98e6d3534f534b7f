pub mod error;
pub mod models;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::broadcast::{Broadcast, NewBroadcast};
pub use models::customer::{Customer, NewCustomer};
pub use models::customer_source::CustomerSource;
pub use models::delivery_record::{DeliveryRecord, NewDeliveryRecord};
pub use models::delivery_status::DeliveryStatus;
pub use normalize::{is_valid_number, normalize_number};
