pub mod broadcast;
pub mod customer;
pub mod customer_source;
pub mod delivery_record;
pub mod delivery_status;
