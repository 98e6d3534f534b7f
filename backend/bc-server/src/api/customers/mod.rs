pub mod create_customer_request;
pub mod customer_list_query;
pub mod customer_list_response;
pub mod customer_response;
pub mod customers;
