mod customer_list_query;
mod delivery_history_query;
mod broadcast_request;
mod error;
mod numbers_input;
