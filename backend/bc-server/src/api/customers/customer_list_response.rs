use bc_core::{Customer, CustomerSource};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub ok: bool,
    pub source: CustomerSource,
    pub count: usize,
    pub data: Vec<Customer>,
}
