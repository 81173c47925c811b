pub mod auth_context;
pub mod auth_gate;
pub mod claims;
pub mod error;
pub mod issued_token;
pub mod tenant_scope_resolver;
pub mod token_codec;

pub use auth_context::AuthContext;
pub use auth_gate::AuthGate;
pub use claims::{Claims, Identity};
pub use error::{AuthError, Result};
pub use issued_token::IssuedToken;
pub use tenant_scope_resolver::TenantScopeResolver;
pub use token_codec::TokenCodec;

#[cfg(test)]
mod tests;
