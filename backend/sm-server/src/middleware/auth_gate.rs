//! Per-request session check for protected routes

use crate::{AppState, AuthRejection};

use sm_auth::{AuthContext, AuthError};

use std::panic::Location;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use http::header::AUTHORIZATION;
use log::{debug, warn};

/// Decode the bearer token and attach an [`AuthContext`] to the request.
///
/// Rejections answer 401 directly; the wrapped handler never runs.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let result = match request.headers().get(AUTHORIZATION) {
        None => state.auth_gate.authenticate(None),
        Some(value) => match value.to_str() {
            Ok(value) => state.auth_gate.authenticate(Some(value)),
            Err(_) => Err(AuthError::MalformedToken {
                message: "authorization header is not valid ASCII".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        },
    };

    match result {
        Ok(ctx) => {
            request.extensions_mut().insert::<AuthContext>(ctx);
            next.run(request).await
        }
        Err(e) => {
            match &e {
                AuthError::InvalidSignature { .. } => warn!(
                    "Rejected token with invalid signature on {} {}",
                    request.method(),
                    request.uri().path()
                ),
                _ => debug!("Rejected request to {}: {}", request.uri().path(), e),
            }
            AuthRejection::new(e, state.auth_debug).into_response()
        }
    }
}
