//! Customer REST API handlers

use crate::{
    ApiError, ApiJson, ApiResult, AppState, CreateCustomerRequest, CustomerListQuery,
    CustomerListResponse, CustomerResponse, SheetAppendResponse,
};

use bc_core::{CustomerSource, NewCustomer};
use bc_dispatch::SheetRow;

use axum::{
    Json,
    extract::{Query, State},
};

/// GET /api/customers?force=1
///
/// Sheet rows when the sheet has any, database rows otherwise.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> ApiResult<Json<CustomerListResponse>> {
    let set = state.engine.get_customers(query.is_forced()).await?;

    Ok(Json(CustomerListResponse {
        ok: true,
        source: set.source,
        count: set.records.len(),
        data: set.records.as_ref().clone(),
    }))
}

/// POST /api/customers
///
/// Insert into the database; the sheet is never written here.
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCustomerRequest>,
) -> ApiResult<Json<CustomerResponse>> {
    let phone = req
        .phone
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::validation("phone is required", Some("phone")))?;

    let customer = state
        .engine
        .add_customer(&NewCustomer {
            name: req.name,
            phone,
            email: req.email,
            metadata: req.metadata,
        })
        .await?;

    Ok(Json(CustomerResponse {
        ok: true,
        source: CustomerSource::Secondary,
        data: customer,
    }))
}

/// POST /api/customers/sheet
///
/// Append the body as one sheet row, matched to the header columns.
pub async fn append_sheet_row(
    State(state): State<AppState>,
    ApiJson(row): ApiJson<SheetRow>,
) -> ApiResult<Json<SheetAppendResponse>> {
    if row.is_empty() {
        return Err(ApiError::validation("no_data", None));
    }

    state.engine.append_primary(&row).await?;

    Ok(Json(SheetAppendResponse { ok: true }))
}
