pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    broadcasts::{
        broadcasts::{list_deliveries, list_deliveries_for_number},
        delivery_history_query::DeliveryHistoryQuery,
        delivery_history_response::DeliveryHistoryResponse,
        delivery_list_response::DeliveryListResponse,
    },
    customers::{
        create_customer_request::CreateCustomerRequest,
        customer_list_query::CustomerListQuery,
        customer_list_response::CustomerListResponse,
        customer_response::{CustomerResponse, SheetAppendResponse},
        customers::{append_sheet_row, create_customer, list_customers},
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::api_json::ApiJson,
    send::{
        broadcast_request::SendBroadcastRequest,
        numbers_input::NumbersInput,
        send::{send_broadcast, send_single, transport_status},
        single_send_request::SendSingleRequest,
        single_send_response::SendSingleResponse,
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;
