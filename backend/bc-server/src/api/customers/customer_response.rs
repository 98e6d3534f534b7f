use bc_core::{Customer, CustomerSource};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub ok: bool,
    pub source: CustomerSource,
    pub data: Customer,
}

#[derive(Debug, Serialize)]
pub struct SheetAppendResponse {
    pub ok: bool,
}
