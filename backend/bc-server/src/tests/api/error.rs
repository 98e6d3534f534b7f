use crate::ApiError;

use bc_core::ErrorLocation;
use bc_dispatch::{DispatchError, ResolveError};

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let response = ApiError::validation("phone is required", Some("phone")).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "phone is required");
    assert_eq!(json["error"]["field"], "phone");
}

#[tokio::test]
async fn test_transport_not_ready_returns_503() {
    let error = ApiError::from(DispatchError::TransportNotReady {
        waited_ms: 1500,
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "TRANSPORT_NOT_READY");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_too_many_recipients_returns_400_with_code() {
    let error = ApiError::from(DispatchError::TooManyRecipients {
        count: 20,
        max: 10,
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "TOO_MANY_RECIPIENTS");
    assert_eq!(json["error"]["message"], "20 recipients exceeds the limit of 10");
}

#[tokio::test]
async fn test_no_data_source_returns_500() {
    let error = ApiError::from(DispatchError::from(ResolveError::NoDataSource {
        location: ErrorLocation::from(Location::caller()),
    }));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NO_DATA_SOURCE");
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let error = ApiError::from(bc_db::DbError::Initialization {
        message: "disk on fire at /var/lib/secret.db".into(),
        location: ErrorLocation::from(Location::caller()),
    });
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "Database operation failed");
}
