//! Delivery ledger read handlers

use crate::{
    ApiError, ApiResult, AppState, DeliveryHistoryQuery, DeliveryHistoryResponse,
    DeliveryListResponse,
};

use bc_core::{is_valid_number, normalize_number};
use bc_db::{BroadcastRepository, DeliveryRecordRepository};

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use error_location::ErrorLocation;

/// GET /api/broadcasts/{id}/deliveries
pub async fn list_deliveries(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeliveryListResponse>> {
    let broadcast = BroadcastRepository::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Broadcast {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let deliveries = DeliveryRecordRepository::find_by_broadcast(&state.pool, id).await?;

    Ok(Json(DeliveryListResponse {
        broadcast,
        deliveries,
    }))
}

/// GET /api/deliveries?phone=...&limit=
///
/// Ledger history for one number across broadcasts and single sends.
pub async fn list_deliveries_for_number(
    State(state): State<AppState>,
    Query(query): Query<DeliveryHistoryQuery>,
) -> ApiResult<Json<DeliveryHistoryResponse>> {
    let raw = query.phone.as_deref().unwrap_or_default();
    if !is_valid_number(raw) {
        return Err(ApiError::validation("phone must contain digits", Some("phone")));
    }

    let number = normalize_number(raw);
    let deliveries =
        DeliveryRecordRepository::find_by_phone(&state.pool, &number, query.limit()).await?;

    Ok(Json(DeliveryHistoryResponse { number, deliveries }))
}
