pub mod broadcasts;
pub mod customers;
pub mod error;
pub mod extractors;
pub mod send;
