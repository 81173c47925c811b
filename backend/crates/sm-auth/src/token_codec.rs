use crate::{AuthError, Claims, Identity, IssuedToken, Result as AuthErrorResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues and verifies HS256 session tokens.
///
/// Claims are signed, not encrypted: anyone holding a token can read them.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn with_hs256(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in decode_at so that `now == exp` counts as expired.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `identity` with `iat = now` and `exp = now + ttl`
    #[track_caller]
    pub fn issue(&self, identity: Identity) -> AuthErrorResult<IssuedToken> {
        self.issue_at(identity, chrono::Utc::now().timestamp())
    }

    #[track_caller]
    pub fn issue_at(&self, identity: Identity, now: i64) -> AuthErrorResult<IssuedToken> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims::from_identity(identity, now, now.saturating_add(ttl_secs));

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AuthError::Signing {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry, returning the claims unchanged
    #[track_caller]
    pub fn decode(&self, token: &str) -> AuthErrorResult<Claims> {
        self.decode_at(token, chrono::Utc::now().timestamp())
    }

    #[track_caller]
    pub fn decode_at(&self, token: &str, now: i64) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature {
                    location: ErrorLocation::from(Location::caller()),
                },
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::MalformedToken {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            })?;

        let claims = token_data.claims;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        claims.validate()?;

        Ok(claims)
    }
}
