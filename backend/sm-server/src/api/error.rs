//! REST API error types
//!
//! Every failure renders as `{ "success": false, "message": ..., "error": ... }`.

use sm_auth::AuthError;
use sm_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::{debug, error};
use serde::Serialize;
use thiserror::Error;

/// JSON failure body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Machine-readable code (e.g. "NOT_FOUND", "TOKEN_EXPIRED")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Offending field for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Underlying decode error, only when auth debugging is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

impl ApiErrorResponse {
    fn new(message: impl Into<String>, error: Option<&'static str>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
            field: None,
            debug: None,
        }
    }
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials or session rejected (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Authenticated but not allowed (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized {
            message: "Invalid credentials".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => error!("{}", self),
            _ => debug!("{}", self),
        }

        let (status, body) = match self {
            // Login failures carry no code so they don't reveal which check failed.
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorResponse::new(message, None),
            ),
            ApiError::Forbidden { message, .. } => (
                StatusCode::FORBIDDEN,
                ApiErrorResponse::new(message, Some("FORBIDDEN")),
            ),
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorResponse::new(message, Some("NOT_FOUND")),
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    field,
                    ..ApiErrorResponse::new(message, Some("VALIDATION_ERROR"))
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::new(message, Some("INTERNAL_ERROR")),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    #[track_caller]
    fn from(e: sqlx::Error) -> Self {
        // Don't expose internal database details to clients
        error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        error!("Database error: {}", e);

        match e {
            DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                ..
            } => ApiError::NotFound {
                message: "Resource not found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Internal {
                message: "Database operation failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Token issuing failures past the auth gate are server faults
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        error!("Token error: {}", e);
        ApiError::Internal {
            message: "Could not issue session token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// 401 produced by the auth gate.
///
/// Only generic decode failures may carry a `debug` field, and only when
/// `expose_debug` is set.
#[derive(Debug)]
pub struct AuthRejection {
    pub error: AuthError,
    pub expose_debug: bool,
}

impl AuthRejection {
    pub fn new(error: AuthError, expose_debug: bool) -> Self {
        Self {
            error,
            expose_debug,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let code = self.error.error_code();
        let generic = !matches!(
            self.error,
            AuthError::MissingHeader { .. }
                | AuthError::TokenExpired { .. }
                | AuthError::InvalidSignature { .. }
        );

        let body = ApiErrorResponse {
            debug: (generic && self.expose_debug).then(|| self.error.to_string()),
            ..ApiErrorResponse::new(self.error.client_message(), code)
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
