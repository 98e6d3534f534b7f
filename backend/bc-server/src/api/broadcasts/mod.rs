pub mod broadcasts;
pub mod delivery_history_query;
pub mod delivery_history_response;
pub mod delivery_list_response;
