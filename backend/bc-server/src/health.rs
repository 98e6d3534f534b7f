use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - database ping plus transport status
pub async fn health(State(state): State<AppState>) -> Response {
    let db_error = bc_db::ping(&state.pool).await.err();
    let transport = state.engine.transport_status();

    let status = if db_error.is_none() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let body = json!({
        "status": if db_error.is_none() { "ok" } else { "error" },
        "version": env!("CARGO_PKG_VERSION"),
        "db": db_error.is_none(),
        "transport": transport,
        "time": chrono::Utc::now().to_rfc3339(),
    });

    if let Some(e) = db_error {
        log::error!("Health check database ping failed: {}", e);
    }

    (status, Json(body)).into_response()
}

/// GET /live - the process answers
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - ready to take traffic once the database answers
pub async fn readiness(State(state): State<AppState>) -> Response {
    match bc_db::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, "Ready").into_response(),
        Err(e) => {
            log::warn!("Readiness probe failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response()
        }
    }
}
