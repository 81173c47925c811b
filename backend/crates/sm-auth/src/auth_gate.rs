use crate::{AuthContext, AuthError, Result as AuthErrorResult, TokenCodec};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;

/// Turns a raw `Authorization` header into an [`AuthContext`].
///
/// `Unauthenticated -> Decoding -> Authenticated | Rejected`; every rejection
/// is terminal for the request.
#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    #[track_caller]
    pub fn authenticate(&self, authorization: Option<&str>) -> AuthErrorResult<AuthContext> {
        let header = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AuthError::MissingHeader {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let token = bearer_token(header)?;
        let claims = self.codec.decode(token)?;

        Ok(AuthContext::from_claims(claims))
    }
}

#[track_caller]
fn bearer_token(header: &str) -> AuthErrorResult<&str> {
    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        })?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(token.trim_start())
}
