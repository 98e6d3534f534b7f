use crate::{
    AppState, append_sheet_row, create_customer, health, list_customers, list_deliveries,
    list_deliveries_for_number, send_broadcast, send_single, transport_status,
};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Sending
        .route("/api/send/broadcast", post(send_broadcast))
        .route("/api/send/single", post(send_single))
        .route("/api/send/status", get(transport_status))
        // Customers
        .route("/api/customers", get(list_customers).post(create_customer))
        .route("/api/customers/sheet", post(append_sheet_row))
        // Ledger
        .route("/api/broadcasts/{id}/deliveries", get(list_deliveries))
        .route("/api/deliveries", get(list_deliveries_for_number))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        // The dashboard is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
