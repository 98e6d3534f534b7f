//! Send REST API handlers

use crate::{
    ApiError, ApiJson, ApiResult, AppState, SendBroadcastRequest, SendSingleRequest,
    SendSingleResponse,
};

use bc_dispatch::{
    BroadcastReport, BroadcastRequest, FailureReason, MediaAttachment, SingleSendRequest,
    TransportStatus,
};

use std::time::Duration;

use axum::{Json, extract::State};

/// POST /api/send/broadcast
///
/// Send one message to many numbers, or to every customer with `send_to_all`.
/// Per-recipient failures are reported in `results`, never as an error.
pub async fn send_broadcast(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendBroadcastRequest>,
) -> ApiResult<Json<BroadcastReport>> {
    let concurrency = req.concurrency_limit();
    let recipients = if req.send_to_all {
        None
    } else {
        let numbers = req.numbers.map(|n| n.into_list()).unwrap_or_default();
        if numbers.is_empty() {
            return Err(ApiError::validation(
                "numbers required (or set send_to_all)",
                Some("numbers"),
            ));
        }
        Some(numbers)
    };

    let report = state
        .engine
        .dispatch_broadcast(BroadcastRequest {
            recipients,
            message: req.message,
            media: req.media_path.map(MediaAttachment::new),
            concurrency,
            name: req.broadcast_name,
            timeout: req.timeout_ms.map(Duration::from_millis),
        })
        .await?;

    Ok(Json(report))
}

/// POST /api/send/single
pub async fn send_single(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SendSingleRequest>,
) -> ApiResult<Json<SendSingleResponse>> {
    let result = state
        .engine
        .send_single(SingleSendRequest {
            number: req.number,
            message: req.message,
            media: req.media_path.map(MediaAttachment::new),
            timeout: req.timeout_ms.map(Duration::from_millis),
        })
        .await?;

    match result.reason {
        None => Ok(Json(SendSingleResponse {
            success: true,
            number: result.number,
            id: result.message_id,
        })),
        Some(FailureReason::NotRegistered) => Err(ApiError::bad_request(
            "NOT_REGISTERED",
            format!("number_not_registered: {}", result.number),
        )),
        Some(FailureReason::InvalidNumber) => Err(ApiError::validation(
            format!("invalid number: {}", result.recipient),
            Some("number"),
        )),
        Some(reason @ (FailureReason::SendFailed | FailureReason::TaskFailed)) => {
            Err(ApiError::internal(
                "SEND_FAILED",
                result.error.unwrap_or_else(|| reason.to_string()),
            ))
        }
    }
}

/// GET /api/send/status
pub async fn transport_status(State(state): State<AppState>) -> Json<TransportStatus> {
    Json(state.engine.transport_status())
}
