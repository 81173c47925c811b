//! Axum extractor for the context the auth gate attached

use crate::ApiError;

use sm_auth::AuthContext;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

/// The authenticated context of the current request.
///
/// Only available on routes behind [`crate::middleware::require_auth`].
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match parts.extensions.get::<AuthContext>() {
                Some(ctx) => Ok(Authenticated(ctx.clone())),
                None => {
                    log::error!("Authenticated extractor used on a route without the auth gate");
                    Err(ApiError::Unauthorized {
                        message: "Authorization header missing".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })
                }
            }
        }
    }
}
