use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Business fields of a session, as handed to the codec at login.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub id: Option<i64>,
    pub account_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub role: String,
    pub email: Option<String>,
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account row id)
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    /// Tenant-side account id; falls back to `id` when absent
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<i64>,
    /// Owning admin; legacy admin tokens omit it
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    pub fn from_identity(identity: Identity, iat: i64, exp: i64) -> Self {
        Self {
            id: identity.id,
            account_id: identity.account_id,
            admin_id: identity.admin_id,
            role: identity.role,
            email: identity.email,
            iat,
            exp,
        }
    }

    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.id.is_none() && self.account_id.is_none() {
            return Err(AuthError::InvalidClaim {
                claim: "id".to_string(),
                message: "token carries neither id nor account_id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.role.trim().is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "role".to_string(),
                message: "role cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

/// 2^63: the first float past `i64::MAX`.
const ID_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Older tokens carry ids as strings; anything that isn't an integer reads as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let id = match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Int(id)) => Some(id),
        Some(RawId::Float(id))
            if id.fract() == 0.0 && (-ID_FLOAT_LIMIT..ID_FLOAT_LIMIT).contains(&id) =>
        {
            Some(id as i64)
        }
        Some(RawId::Text(text)) => text.trim().parse().ok(),
        _ => None,
    };

    Ok(id)
}
