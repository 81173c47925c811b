use crate::{ApiError, AuthRejection};

use sm_auth::AuthError;

use std::panic::Location;

use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_code() {
    let response = ApiError::NotFound {
        message: "Account not found".into(),
        location: here(),
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "NOT_FOUND");
    assert_eq!(json["message"], "Account not found");
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let response = ApiError::validation("limit must be between 1 and 100", "limit").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "limit");
}

#[tokio::test]
async fn given_invalid_credentials_when_rendered_then_401_without_code() {
    let response = ApiError::invalid_credentials().into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": "Invalid credentials" })
    );
}

#[tokio::test]
async fn given_sqlx_error_when_converted_then_internal_without_details() {
    let error: ApiError = sqlx::Error::PoolClosed.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "Database operation failed");
}

#[tokio::test]
async fn given_row_not_found_db_error_when_converted_then_404() {
    let error: ApiError = sm_db::DbError::from(sqlx::Error::RowNotFound).into();

    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_missing_header_rejection_when_rendered_then_message_only() {
    let response = AuthRejection::new(AuthError::MissingHeader { location: here() }, true)
        .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": "Authorization header missing" })
    );
}

#[tokio::test]
async fn given_malformed_token_without_debug_when_rendered_then_no_debug_field() {
    let error = AuthError::MalformedToken {
        message: "InvalidToken".into(),
        location: here(),
    };

    let json = body_json(AuthRejection::new(error, false).into_response()).await;

    assert_eq!(json["error"], "INVALID_TOKEN");
    assert_eq!(json["message"], "Invalid token");
    assert!(json.get("debug").is_none());
}

#[tokio::test]
async fn given_malformed_token_with_debug_when_rendered_then_debug_carries_cause() {
    let error = AuthError::MalformedToken {
        message: "InvalidToken".into(),
        location: here(),
    };

    let json = body_json(AuthRejection::new(error, true).into_response()).await;

    assert!(json["debug"].as_str().unwrap().contains("InvalidToken"));
}

#[tokio::test]
async fn given_invalid_signature_with_debug_when_rendered_then_no_debug_field() {
    let error = AuthError::InvalidSignature { location: here() };

    let json = body_json(AuthRejection::new(error, true).into_response()).await;

    assert_eq!(json["error"], "INVALID_SIGNATURE");
    assert!(json.get("debug").is_none());
}
