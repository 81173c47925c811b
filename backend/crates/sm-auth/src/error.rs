use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Token signature verification failed {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    MalformedToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    Signing {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code sent to clients in the `error` field.
    ///
    /// A missing header carries no code, only the message.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::MissingHeader { .. } => None,
            Self::TokenExpired { .. } => Some("TOKEN_EXPIRED"),
            Self::InvalidSignature { .. } => Some("INVALID_SIGNATURE"),
            Self::InvalidScheme { .. }
            | Self::MalformedToken { .. }
            | Self::InvalidClaim { .. }
            | Self::Signing { .. } => Some("INVALID_TOKEN"),
        }
    }

    /// Human-readable message sent to clients. Never includes internals.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "Authorization header missing",
            Self::TokenExpired { .. } => "Token has expired",
            Self::InvalidSignature { .. } => "Invalid token signature. Please log in again.",
            _ => "Invalid token",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
