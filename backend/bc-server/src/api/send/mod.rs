pub mod broadcast_request;
pub mod numbers_input;
pub mod send;
pub mod single_send_request;
pub mod single_send_response;
